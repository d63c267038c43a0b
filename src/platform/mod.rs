// Copyright 2026 stickstate Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Devices that can be wrapped by [`Joystick`](crate::Joystick).
//!
//! Each backend has to provide:
//!
//! * Number of axes, buttons, POVs and sliders. [`Joystick`](crate::Joystick) asks only once.
//! * A `capture` function that reports everything that changed since previous call to the given
//!   [`EventSink`] and returns. It must not call the sink after returning.
//!
//! Opening and closing devices is left to the backend; `Device` only describes already opened
//! device.

use crate::ev::EventSink;

use uuid::Uuid;

use std::error;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

pub mod scripted;

#[cfg(target_os = "linux")]
pub mod linux;

/// Kind of input component.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    Axis,
    Button,
    Pov,
    Slider,
}

/// Opened input device.
pub trait Device {
    /// Returns number of components of given kind.
    fn component_count(&self, component: Component) -> usize;

    /// Delivers all pending notifications to `sink`.
    ///
    /// Notifications for a single component are delivered in the order they happened. There is no
    /// ordering guarantee between different components.
    fn capture(&mut self, sink: &mut dyn EventSink) -> Result<(), Error>;

    /// Human readable name of the device.
    fn name(&self) -> &str;

    /// Identifier of device model. Returns nil UUID if backend can't tell.
    fn uuid(&self) -> Uuid {
        Uuid::nil()
    }
}

impl<D: Device + ?Sized> Device for &mut D {
    fn component_count(&self, component: Component) -> usize {
        (**self).component_count(component)
    }

    fn capture(&mut self, sink: &mut dyn EventSink) -> Result<(), Error> {
        (**self).capture(sink)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn uuid(&self) -> Uuid {
        (**self).uuid()
    }
}

impl<D: Device + ?Sized> Device for Box<D> {
    fn component_count(&self, component: Component) -> usize {
        (**self).component_count(component)
    }

    fn capture(&mut self, sink: &mut dyn EventSink) -> Result<(), Error> {
        (**self).capture(sink)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn uuid(&self) -> Uuid {
        (**self).uuid()
    }
}

/// Error reported by device.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Device was disconnected. Further captures will fail too.
    Disconnected,
    /// Opened device node doesn't have any joystick components.
    NotJoystick(PathBuf),
    /// Platform specific error.
    Other(Box<dyn error::Error + Send + Sync + 'static>),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Disconnected => f.write_str("device is not connected"),
            Error::NotJoystick(path) => {
                f.write_fmt(format_args!("{} is not a joystick", path.display()))
            }
            Error::Other(e) => f.write_fmt(format_args!("platform error: {}", e)),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Other(e) => Some(&**e),
            _ => None,
        }
    }
}
