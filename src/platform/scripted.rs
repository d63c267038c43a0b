// Copyright 2026 stickstate Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! In-memory device driven by a script of capture passes.
//!
//! Useful for tests and for replaying recorded input.
//!
//! ```
//! use stickstate::platform::scripted::ScriptedDevice;
//! use stickstate::platform::Component;
//! use stickstate::{Event, Joystick};
//!
//! let mut device = ScriptedDevice::new("pad")
//!     .with_count(Component::Button, 2)
//!     .with_count(Component::Axis, 1);
//! device.push_pass(vec![Event::ButtonPressed(1), Event::AxisMoved(0, 512)]);
//!
//! let mut js = Joystick::new(device);
//! js.update().unwrap();
//! assert!(js.is_pressed(1));
//! assert_eq!(js.axis(0), 512);
//! ```

use super::{Component, Device, Error};
use crate::ev::{Event, EventSink};

use fnv::FnvHashMap;
use uuid::Uuid;

use std::cell::Cell;
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct ScriptedDevice {
    name: String,
    uuid: Uuid,
    counts: FnvHashMap<Component, usize>,
    passes: VecDeque<Vec<Event>>,
    count_queries: Cell<usize>,
    captures: usize,
    connected: bool,
}

impl ScriptedDevice {
    /// Creates connected device without any components.
    pub fn new(name: &str) -> Self {
        ScriptedDevice {
            name: name.to_owned(),
            connected: true,
            ..Default::default()
        }
    }

    pub fn with_count(mut self, component: Component, count: usize) -> Self {
        self.set_count(component, count);
        self
    }

    pub fn with_uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = uuid;
        self
    }

    /// Changes number of components reported from now on.
    pub fn set_count(&mut self, component: Component, count: usize) {
        self.counts.insert(component, count);
    }

    /// Queues events that will be delivered by one `capture` call. Passes are consumed in FIFO
    /// order; `capture` with no queued pass delivers nothing.
    pub fn push_pass(&mut self, events: Vec<Event>) {
        self.passes.push_back(events);
    }

    /// Number of passes that haven't been captured yet.
    pub fn pending_passes(&self) -> usize {
        self.passes.len()
    }

    /// How many times `component_count` was called.
    pub fn count_queries(&self) -> usize {
        self.count_queries.get()
    }

    /// How many times `capture` was called, including failed ones.
    pub fn captures(&self) -> usize {
        self.captures
    }

    /// Makes every following `capture` fail with `Error::Disconnected`.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

impl Device for ScriptedDevice {
    fn component_count(&self, component: Component) -> usize {
        self.count_queries.set(self.count_queries.get() + 1);
        self.counts.get(&component).cloned().unwrap_or(0)
    }

    fn capture(&mut self, sink: &mut dyn EventSink) -> Result<(), Error> {
        self.captures += 1;

        if !self.connected {
            return Err(Error::Disconnected);
        }

        if let Some(pass) = self.passes.pop_front() {
            trace!("{}: replaying {} events", self.name, pass.len());
            for ev in pass {
                ev.dispatch(sink);
            }
        }

        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn uuid(&self) -> Uuid {
        self.uuid
    }
}
