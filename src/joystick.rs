// Copyright 2026 stickstate Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::ev::{EventSink, Tee};
use crate::platform::{Component, Device, Error};
use crate::pov::{PovDirection, UnexpectedPovValue};
use crate::state::DeviceState;

use uuid::Uuid;

/// Joystick with cached state.
///
/// Number of components is read from device once, in `new()`. State is changed only by
/// [`update()`](Joystick::update), which should be called once per frame. Between updates, all
/// getters return values from the last capture.
///
/// All ids must be smaller than the matching count (`num_buttons()` etc.). Using other ids panics.
///
/// `D` may be an owned device, `Box<dyn Device>` or `&mut` reference to device owned by someone
/// else.
#[derive(Debug)]
pub struct Joystick<D: Device> {
    device: D,
    state: DeviceState,
}

impl<D: Device> Joystick<D> {
    /// Wraps already opened device.
    pub fn new(device: D) -> Self {
        let state = DeviceState::new(
            device.component_count(Component::Button),
            device.component_count(Component::Axis),
            device.component_count(Component::Pov),
            device.component_count(Component::Slider),
        );

        debug!(
            "Joystick {}: buttons: {}, axes: {}, povs: {}, sliders: {}",
            device.name(),
            state.num_buttons(),
            state.num_axes(),
            state.num_povs(),
            state.num_sliders()
        );

        Joystick { device, state }
    }

    /// Captures pending events from device and applies them to cached state.
    ///
    /// Errors from the device are returned unchanged. Events delivered before the error are kept.
    pub fn update(&mut self) -> Result<(), Error> {
        let Joystick { device, state } = self;
        let res = device.capture(&mut StateWriter(state));
        log_capture_error(&*device, res)
    }

    /// Same as [`update()`](Joystick::update), but every event is also passed to `observer`,
    /// after it has been applied to the state.
    pub fn update_with<S: EventSink>(&mut self, observer: S) -> Result<(), Error> {
        let Joystick { device, state } = self;
        let res = device.capture(&mut Tee(StateWriter(state), observer));
        log_capture_error(&*device, res)
    }

    pub fn num_axes(&self) -> usize {
        self.state.num_axes()
    }

    pub fn num_buttons(&self) -> usize {
        self.state.num_buttons()
    }

    pub fn num_povs(&self) -> usize {
        self.state.num_povs()
    }

    pub fn num_sliders(&self) -> usize {
        self.state.num_sliders()
    }

    /// Returns last reported absolute value of axis.
    pub fn axis(&self, id: usize) -> i32 {
        self.state.axis(id)
    }

    pub fn is_pressed(&self, id: usize) -> bool {
        self.state.button(id)
    }

    /// Returns direction of POV switch.
    ///
    /// Fails if device reported value that doesn't match any direction. The raw value is still
    /// available through [`pov_raw()`](Joystick::pov_raw). Such value is logged once, when it is
    /// captured, not on every call.
    pub fn pov(&self, id: usize) -> Result<PovDirection, UnexpectedPovValue> {
        self.state.pov(id)
    }

    pub fn pov_raw(&self, id: usize) -> i32 {
        self.state.pov_raw(id)
    }

    pub fn slider_x(&self, id: usize) -> i32 {
        self.state.slider_x(id)
    }

    pub fn slider_y(&self, id: usize) -> i32 {
        self.state.slider_y(id)
    }

    /// Returns cached state.
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn name(&self) -> &str {
        self.device.name()
    }

    pub fn uuid(&self) -> Uuid {
        self.device.uuid()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Mutable access to device. Counts will not be queried again.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Returns wrapped device, dropping cached state.
    pub fn into_inner(self) -> D {
        self.device
    }
}

fn log_capture_error<D>(device: &D, res: Result<(), Error>) -> Result<(), Error>
where
    D: Device + ?Sized,
{
    if let Err(ref e) = res {
        warn!("Capture from {} failed: {}", device.name(), e);
    }
    res
}

/// Returns error if POV changes to a value that can't be decoded. Repeating the same bad value
/// is not reported again.
fn new_bad_pov(previous: i32, raw: i32) -> Option<UnexpectedPovValue> {
    if previous == raw {
        return None;
    }
    PovDirection::from_raw(raw).err()
}

/// Applies notifications to `DeviceState`.
struct StateWriter<'a>(&'a mut DeviceState);

impl<'a> EventSink for StateWriter<'a> {
    fn button_pressed(&mut self, button: usize) {
        trace!("button {} pressed", button);
        self.0.set_button(button, true);
    }

    fn button_released(&mut self, button: usize) {
        trace!("button {} released", button);
        self.0.set_button(button, false);
    }

    fn axis_moved(&mut self, axis: usize, value: i32) {
        trace!("axis {} moved to {}", axis, value);
        self.0.set_axis(axis, value);
    }

    fn pov_moved(&mut self, pov: usize, direction: i32) {
        trace!("pov {} changed to {:#06x}", pov, direction);
        if let Some(e) = new_bad_pov(self.0.pov_raw(pov), direction) {
            error!("pov {}: {}", pov, e);
        }
        self.0.set_pov(pov, direction);
    }

    fn slider_moved(&mut self, slider: usize, x: i32, y: i32) {
        trace!("slider {} moved to ({}, {})", slider, x, y);
        self.0.set_slider(slider, x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ev::Event;
    use crate::platform::scripted::ScriptedDevice;

    fn device(buttons: usize, axes: usize, povs: usize, sliders: usize) -> ScriptedDevice {
        ScriptedDevice::new("test")
            .with_count(Component::Button, buttons)
            .with_count(Component::Axis, axes)
            .with_count(Component::Pov, povs)
            .with_count(Component::Slider, sliders)
    }

    #[test]
    fn initial_state() {
        let js = Joystick::new(device(2, 1, 1, 0));

        assert!(!js.is_pressed(0));
        assert!(!js.is_pressed(1));
        assert_eq!(js.axis(0), 0);
        assert_eq!(js.pov_raw(0), 0);
        assert_eq!(js.pov(0), Ok(PovDirection::Centered));
        assert_eq!(js.num_sliders(), 0);
    }

    #[test]
    fn single_pass() {
        let mut dev = device(2, 1, 1, 0);
        dev.push_pass(vec![
            Event::ButtonPressed(0),
            Event::AxisMoved(0, 127),
            Event::PovMoved(0, 0x0101),
        ]);

        let mut js = Joystick::new(dev);
        js.update().unwrap();

        assert!(js.is_pressed(0));
        assert!(!js.is_pressed(1));
        assert_eq!(js.axis(0), 127);
        assert_eq!(js.pov(0), Ok(PovDirection::NorthEast));
    }

    #[test]
    fn press_and_release_in_one_pass() {
        let mut dev = device(1, 0, 0, 0);
        dev.push_pass(vec![Event::ButtonPressed(0), Event::ButtonReleased(0)]);

        let mut js = Joystick::new(dev);
        js.update().unwrap();

        assert!(!js.is_pressed(0));
    }

    #[test]
    fn button_stays_pressed_until_released() {
        let mut dev = device(1, 0, 0, 0);
        dev.push_pass(vec![Event::ButtonPressed(0)]);
        dev.push_pass(vec![]);
        dev.push_pass(vec![Event::ButtonPressed(0), Event::ButtonPressed(0)]);
        dev.push_pass(vec![Event::ButtonReleased(0)]);

        let mut js = Joystick::new(dev);
        let mut seen = Vec::new();
        for _ in 0..4 {
            js.update().unwrap();
            seen.push(js.is_pressed(0));
        }

        assert_eq!(seen, vec![true, true, true, false]);
    }

    #[test]
    fn last_value_wins_with_interleaving() {
        let mut dev = device(1, 2, 0, 2);
        dev.push_pass(vec![
            Event::AxisMoved(0, 10),
            Event::SliderMoved(1, 3, 4),
            Event::AxisMoved(1, -5),
            Event::ButtonPressed(0),
            Event::AxisMoved(0, 20),
            Event::SliderMoved(0, 100, 200),
            Event::AxisMoved(1, -6),
            Event::SliderMoved(1, -3, -4),
            Event::AxisMoved(0, -30),
        ]);

        let mut js = Joystick::new(dev);
        js.update().unwrap();

        assert_eq!(js.axis(0), -30);
        assert_eq!(js.axis(1), -6);
        assert_eq!((js.slider_x(0), js.slider_y(0)), (100, 200));
        assert_eq!((js.slider_x(1), js.slider_y(1)), (-3, -4));
    }

    #[test]
    fn counts_are_queried_once() {
        let mut dev = device(3, 2, 1, 1);
        dev.push_pass(vec![Event::AxisMoved(1, 1)]);

        let mut js = Joystick::new(dev);
        assert_eq!(js.device().count_queries(), 4);

        js.device_mut().set_count(Component::Button, 10);
        js.device_mut().set_count(Component::Axis, 0);
        for _ in 0..3 {
            js.update().unwrap();
        }

        assert_eq!(js.num_buttons(), 3);
        assert_eq!(js.num_axes(), 2);
        assert_eq!(js.num_povs(), 1);
        assert_eq!(js.num_sliders(), 1);
        assert_eq!(js.axis(1), 1);
        assert_eq!(js.device().count_queries(), 4);
    }

    #[test]
    fn unexpected_pov_fails() {
        let mut dev = device(0, 0, 1, 0);
        dev.push_pass(vec![Event::PovMoved(0, 0x0111)]);

        let mut js = Joystick::new(dev);
        js.update().unwrap();

        assert_eq!(js.pov(0), Err(UnexpectedPovValue(0x0111)));
        assert_eq!(js.pov_raw(0), 0x0111);
    }

    #[test]
    fn empty_device() {
        let mut js = Joystick::new(device(0, 0, 0, 0));
        js.update().unwrap();

        assert_eq!(js.num_buttons(), 0);
        assert_eq!(js.num_axes(), 0);
        assert_eq!(js.num_povs(), 0);
        assert_eq!(js.num_sliders(), 0);
    }

    #[test]
    #[should_panic]
    fn out_of_range_event_panics() {
        let mut dev = device(1, 0, 0, 0);
        dev.push_pass(vec![Event::ButtonPressed(1)]);

        let mut js = Joystick::new(dev);
        let _ = js.update();
    }

    #[test]
    fn capture_error_is_propagated() {
        let mut dev = device(1, 0, 0, 0);
        dev.push_pass(vec![Event::ButtonPressed(0)]);

        let mut js = Joystick::new(dev);
        js.update().unwrap();
        js.device_mut().disconnect();

        match js.update() {
            Err(Error::Disconnected) => (),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(js.is_pressed(0));
    }

    #[test]
    fn capture_error_is_propagated_with_observer() {
        let mut dev = device(1, 0, 0, 0);
        dev.disconnect();

        let mut js = Joystick::new(dev);
        let mut seen: Vec<Event> = Vec::new();

        match js.update_with(&mut seen) {
            Err(Error::Disconnected) => (),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(seen.is_empty());
        assert_eq!(js.device().captures(), 1);
    }

    #[test]
    fn bad_pov_is_reported_once_per_value() {
        assert_eq!(new_bad_pov(0x0000, 0x0111), Some(UnexpectedPovValue(0x0111)));
        assert_eq!(new_bad_pov(0x0111, 0x0111), None);
        assert_eq!(new_bad_pov(0x0111, 0x0011), Some(UnexpectedPovValue(0x0011)));
        assert_eq!(new_bad_pov(0x0111, 0x0001), None);
        assert_eq!(new_bad_pov(0x0000, 0x0000), None);
    }

    #[test]
    fn stuck_bad_pov_reads_same_error() {
        let mut dev = device(0, 0, 1, 0);
        dev.push_pass(vec![Event::PovMoved(0, 0x0111)]);
        dev.push_pass(vec![Event::PovMoved(0, 0x0111)]);

        let mut js = Joystick::new(dev);
        for _ in 0..2 {
            js.update().unwrap();
            assert_eq!(js.pov(0), Err(UnexpectedPovValue(0x0111)));
            assert_eq!(js.pov(0), Err(UnexpectedPovValue(0x0111)));
        }
    }

    #[test]
    fn borrowed_device() {
        let mut dev = device(1, 1, 0, 0);
        dev.push_pass(vec![Event::AxisMoved(0, 9)]);

        {
            let mut js = Joystick::new(&mut dev);
            js.update().unwrap();
            assert_eq!(js.axis(0), 9);
        }

        assert_eq!(dev.captures(), 1);
    }

    #[test]
    fn boxed_device() {
        let mut dev = device(0, 0, 0, 1);
        dev.push_pass(vec![Event::SliderMoved(0, 1, 2)]);

        let boxed: Box<dyn Device> = Box::new(dev);
        let mut js = Joystick::new(boxed);
        js.update().unwrap();

        assert_eq!(js.name(), "test");
        assert_eq!(js.uuid(), Uuid::nil());
        assert_eq!(js.slider_y(0), 2);
    }

    #[test]
    fn observer_sees_pass() {
        let mut dev = device(1, 1, 0, 0);
        let pass = vec![Event::ButtonPressed(0), Event::AxisMoved(0, 3)];
        dev.push_pass(pass.clone());

        let mut js = Joystick::new(dev);
        let mut seen: Vec<Event> = Vec::new();
        js.update_with(&mut seen).unwrap();

        assert_eq!(seen, pass);
        assert!(js.is_pressed(0));
        assert_eq!(js.state().axis(0), 3);
    }
}
