// Copyright 2026 stickstate Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! stickstate - polled joystick state
//! ==================================
//!
//! stickstate keeps the current state of a joystick (buttons, axes, POV hats and sliders) and
//! refreshes it once per frame. Devices report changes as notifications; [`Joystick`] turns them
//! into a snapshot that can be read at any time without caring when or in which order events
//! arrived.
//!
//! Example
//! -------
//!
//! ```
//! use stickstate::platform::scripted::ScriptedDevice;
//! use stickstate::platform::Component;
//! use stickstate::{Event, Joystick, PovDirection};
//!
//! let mut device = ScriptedDevice::new("Stick")
//!     .with_count(Component::Button, 2)
//!     .with_count(Component::Axis, 1)
//!     .with_count(Component::Pov, 1);
//! device.push_pass(vec![
//!     Event::ButtonPressed(0),
//!     Event::AxisMoved(0, 127),
//!     Event::PovMoved(0, 0x0101),
//! ]);
//!
//! let mut js = Joystick::new(device);
//!
//! // Once per frame
//! js.update().unwrap();
//!
//! assert!(js.is_pressed(0));
//! assert!(!js.is_pressed(1));
//! assert_eq!(js.axis(0), 127);
//! assert_eq!(js.pov(0), Ok(PovDirection::NorthEast));
//! ```
//!
//! Values
//! ------
//!
//! Axis and slider values are absolute and in whatever range device uses. They are never
//! normalized. POV values are stored raw and decoded when read; a value that isn't one of the
//! nine known directions is an error, see [`UnexpectedPovValue`].
//!
//! Ids are indices smaller than the count of given component. Using other ids panics.
//!
//! Platform specific notes
//! ======================
//!
//! Linux
//! -----
//!
//! [`platform::linux::Evdev`] reads directly from `/dev/input/event*` file, so user has to have
//! read access to it. Finding the file is left to the caller.

#[macro_use]
extern crate log;

mod joystick;
mod state;

pub mod ev;
pub mod platform;
pub mod pov;

pub use crate::ev::{Event, EventSink};
pub use crate::joystick::Joystick;
pub use crate::platform::{Component, Device, Error};
pub use crate::pov::{PovDirection, UnexpectedPovValue};
pub use crate::state::{ButtonIter, DeviceState, SliderIter, ValueIter};
