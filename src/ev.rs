// Copyright 2026 stickstate Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Notifications delivered by devices during capture.
//!
//! A [`Device`](crate::platform::Device) reports what changed since the last capture by calling
//! methods of [`EventSink`]. Calls happen synchronously, on the thread that called `capture`,
//! before `capture` returns. [`Event`] is an owned form of one such call; it is used to script
//! devices and to record what a capture pass delivered.

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Receiver of device notifications.
///
/// All ids are indices in `0..count` where count is what device reported for given component.
pub trait EventSink {
    /// Button was pressed.
    fn button_pressed(&mut self, button: usize);

    /// Button was released.
    fn button_released(&mut self, button: usize);

    /// Axis moved. `value` is absolute position in device units.
    fn axis_moved(&mut self, axis: usize, value: i32);

    /// POV switch changed. `direction` is raw bitmask, see [`PovDirection`](crate::PovDirection).
    fn pov_moved(&mut self, pov: usize, direction: i32);

    /// Slider moved. Both coordinates are absolute.
    fn slider_moved(&mut self, slider: usize, x: i32, y: i32);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn button_pressed(&mut self, button: usize) {
        (**self).button_pressed(button)
    }

    fn button_released(&mut self, button: usize) {
        (**self).button_released(button)
    }

    fn axis_moved(&mut self, axis: usize, value: i32) {
        (**self).axis_moved(axis, value)
    }

    fn pov_moved(&mut self, pov: usize, direction: i32) {
        (**self).pov_moved(pov, direction)
    }

    fn slider_moved(&mut self, slider: usize, x: i32, y: i32) {
        (**self).slider_moved(slider, x, y)
    }
}

/// Single device notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Event {
    ButtonPressed(usize),
    ButtonReleased(usize),
    AxisMoved(usize, i32),
    PovMoved(usize, i32),
    SliderMoved(usize, i32, i32),
}

impl Event {
    /// Calls method of `sink` that corresponds to this event.
    pub fn dispatch<S: EventSink + ?Sized>(self, sink: &mut S) {
        match self {
            Event::ButtonPressed(id) => sink.button_pressed(id),
            Event::ButtonReleased(id) => sink.button_released(id),
            Event::AxisMoved(id, value) => sink.axis_moved(id, value),
            Event::PovMoved(id, direction) => sink.pov_moved(id, direction),
            Event::SliderMoved(id, x, y) => sink.slider_moved(id, x, y),
        }
    }
}

/// Records every notification in order.
impl EventSink for Vec<Event> {
    fn button_pressed(&mut self, button: usize) {
        self.push(Event::ButtonPressed(button));
    }

    fn button_released(&mut self, button: usize) {
        self.push(Event::ButtonReleased(button));
    }

    fn axis_moved(&mut self, axis: usize, value: i32) {
        self.push(Event::AxisMoved(axis, value));
    }

    fn pov_moved(&mut self, pov: usize, direction: i32) {
        self.push(Event::PovMoved(pov, direction));
    }

    fn slider_moved(&mut self, slider: usize, x: i32, y: i32) {
        self.push(Event::SliderMoved(slider, x, y));
    }
}

/// Forwards every notification to both sinks, first `.0` then `.1`.
#[derive(Debug)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: EventSink, B: EventSink> EventSink for Tee<A, B> {
    fn button_pressed(&mut self, button: usize) {
        self.0.button_pressed(button);
        self.1.button_pressed(button);
    }

    fn button_released(&mut self, button: usize) {
        self.0.button_released(button);
        self.1.button_released(button);
    }

    fn axis_moved(&mut self, axis: usize, value: i32) {
        self.0.axis_moved(axis, value);
        self.1.axis_moved(axis, value);
    }

    fn pov_moved(&mut self, pov: usize, direction: i32) {
        self.0.pov_moved(pov, direction);
        self.1.pov_moved(pov, direction);
    }

    fn slider_moved(&mut self, slider: usize, x: i32, y: i32) {
        self.0.slider_moved(slider, x, y);
        self.1.slider_moved(slider, x, y);
    }
}
