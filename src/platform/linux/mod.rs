// Copyright 2026 stickstate Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Linux evdev backend.
//!
//! Reads directly from `/dev/input/event*` files, so user needs read access to them. Finding the
//! right file is up to the caller.

mod evdev;
mod ioctl;

pub use self::evdev::{Evdev, EvdevBuilder};
