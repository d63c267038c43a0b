// Copyright 2026 stickstate Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::pov::{PovDirection, UnexpectedPovValue};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use std::iter::{Enumerate, Zip};
use std::slice;

/// Cached state of one device.
///
/// Size of every component list is fixed when state is created. All ids passed to methods of
/// this type must be smaller than the matching count; out of range id panics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct DeviceState {
    buttons: Vec<bool>,
    axes: Vec<i32>,
    // Raw bitmask, decoded on read
    povs: Vec<i32>,
    sliders_x: Vec<i32>,
    sliders_y: Vec<i32>,
}

impl DeviceState {
    /// Creates state with all buttons released and all other values set to 0.
    pub fn new(buttons: usize, axes: usize, povs: usize, sliders: usize) -> Self {
        DeviceState {
            buttons: vec![false; buttons],
            axes: vec![0; axes],
            povs: vec![0; povs],
            sliders_x: vec![0; sliders],
            sliders_y: vec![0; sliders],
        }
    }

    pub fn num_buttons(&self) -> usize {
        self.buttons.len()
    }

    pub fn num_axes(&self) -> usize {
        self.axes.len()
    }

    pub fn num_povs(&self) -> usize {
        self.povs.len()
    }

    pub fn num_sliders(&self) -> usize {
        self.sliders_x.len()
    }

    pub fn set_button(&mut self, id: usize, pressed: bool) {
        self.buttons[id] = pressed;
    }

    /// Stores absolute axis value, replacing previous one.
    pub fn set_axis(&mut self, id: usize, value: i32) {
        self.axes[id] = value;
    }

    /// Stores raw POV bitmask. Value is not validated here, see [`DeviceState::pov`].
    pub fn set_pov(&mut self, id: usize, raw: i32) {
        self.povs[id] = raw;
    }

    pub fn set_slider(&mut self, id: usize, x: i32, y: i32) {
        self.sliders_x[id] = x;
        self.sliders_y[id] = y;
    }

    /// Returns `true` if button is pressed.
    pub fn button(&self, id: usize) -> bool {
        self.buttons[id]
    }

    pub fn axis(&self, id: usize) -> i32 {
        self.axes[id]
    }

    /// Returns POV value exactly as device reported it.
    pub fn pov_raw(&self, id: usize) -> i32 {
        self.povs[id]
    }

    /// Decodes cached POV value.
    pub fn pov(&self, id: usize) -> Result<PovDirection, UnexpectedPovValue> {
        PovDirection::from_raw(self.povs[id])
    }

    pub fn slider_x(&self, id: usize) -> i32 {
        self.sliders_x[id]
    }

    pub fn slider_y(&self, id: usize) -> i32 {
        self.sliders_y[id]
    }

    /// Iterate over `(id, is_pressed)` pairs.
    pub fn buttons(&self) -> ButtonIter<'_> {
        ButtonIter(self.buttons.iter().enumerate())
    }

    /// Iterate over `(id, value)` pairs of axes.
    pub fn axes(&self) -> ValueIter<'_> {
        ValueIter(self.axes.iter().enumerate())
    }

    /// Iterate over `(id, raw)` pairs of POVs.
    pub fn povs(&self) -> ValueIter<'_> {
        ValueIter(self.povs.iter().enumerate())
    }

    /// Iterate over `(id, x, y)` of sliders.
    pub fn sliders(&self) -> SliderIter<'_> {
        SliderIter(self.sliders_x.iter().zip(self.sliders_y.iter()).enumerate())
    }

    /// Sets every value back to default. Counts stay the same.
    pub fn reset(&mut self) {
        self.buttons.iter_mut().for_each(|b| *b = false);
        for v in self
            .axes
            .iter_mut()
            .chain(self.povs.iter_mut())
            .chain(self.sliders_x.iter_mut())
            .chain(self.sliders_y.iter_mut())
        {
            *v = 0;
        }
    }
}

/// Iterator over button states.
pub struct ButtonIter<'a>(Enumerate<slice::Iter<'a, bool>>);

/// Iterator over axis or raw POV values.
pub struct ValueIter<'a>(Enumerate<slice::Iter<'a, i32>>);

/// Iterator over slider positions.
pub struct SliderIter<'a>(Enumerate<Zip<slice::Iter<'a, i32>, slice::Iter<'a, i32>>>);

impl<'a> Iterator for ButtonIter<'a> {
    type Item = (usize, bool);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(id, pressed)| (id, *pressed))
    }
}

impl<'a> Iterator for ValueIter<'a> {
    type Item = (usize, i32);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(id, value)| (id, *value))
    }
}

impl<'a> Iterator for SliderIter<'a> {
    type Item = (usize, i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(id, (x, y))| (id, *x, *y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_has_defaults() {
        let state = DeviceState::new(3, 2, 1, 2);

        assert_eq!(state.num_buttons(), 3);
        assert_eq!(state.num_axes(), 2);
        assert_eq!(state.num_povs(), 1);
        assert_eq!(state.num_sliders(), 2);

        assert!(state.buttons().all(|(_, pressed)| !pressed));
        assert!(state.axes().all(|(_, v)| v == 0));
        assert_eq!(state.pov(0), Ok(PovDirection::Centered));
        assert_eq!(state.sliders().collect::<Vec<_>>(), vec![(0, 0, 0), (1, 0, 0)]);
    }

    #[test]
    fn last_write_wins() {
        let mut state = DeviceState::new(1, 1, 1, 1);

        state.set_axis(0, 10);
        state.set_axis(0, -32768);
        assert_eq!(state.axis(0), -32768);

        state.set_button(0, true);
        state.set_button(0, true);
        assert!(state.button(0));
        state.set_button(0, false);
        assert!(!state.button(0));

        state.set_slider(0, 1, 2);
        state.set_slider(0, 3, 4);
        assert_eq!((state.slider_x(0), state.slider_y(0)), (3, 4));
    }

    #[test]
    fn pov_is_decoded_on_read() {
        let mut state = DeviceState::new(0, 0, 2, 0);

        state.set_pov(0, 0x0110);
        state.set_pov(1, 0x0111);

        assert_eq!(state.pov_raw(1), 0x0111);
        assert_eq!(state.pov(0), Ok(PovDirection::SouthEast));
        assert_eq!(state.pov(1), Err(UnexpectedPovValue(0x0111)));
    }

    #[test]
    fn empty_categories() {
        let state = DeviceState::new(0, 0, 0, 0);

        assert_eq!(state.buttons().count(), 0);
        assert_eq!(state.axes().count(), 0);
        assert_eq!(state.povs().count(), 0);
        assert_eq!(state.sliders().count(), 0);
        assert_eq!(state, DeviceState::default());
    }

    #[test]
    #[should_panic]
    fn out_of_range_read_panics() {
        let state = DeviceState::new(2, 0, 0, 0);
        let _ = state.button(2);
    }

    #[test]
    #[should_panic]
    fn out_of_range_write_panics() {
        let mut state = DeviceState::new(0, 1, 0, 0);
        state.set_axis(1, 5);
    }

    #[test]
    fn reset_keeps_counts() {
        let mut state = DeviceState::new(2, 2, 1, 1);
        state.set_button(1, true);
        state.set_axis(0, 99);
        state.set_pov(0, 0x1000);
        state.set_slider(0, -1, 1);

        let snapshot = state.clone();
        state.reset();

        assert_eq!(state, DeviceState::new(2, 2, 1, 1));
        assert!(snapshot.button(1));
        assert_eq!(snapshot.pov(0), Ok(PovDirection::West));
    }
}
