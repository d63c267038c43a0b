// Copyright 2026 stickstate Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Prints state of a joystick ten times per second.
//!
//! On Linux pass path to evdev node: `cargo run --example poll -- /dev/input/event5`. Without
//! argument (or on other platforms) a scripted device is used.

use stickstate::platform::scripted::ScriptedDevice;
use stickstate::platform::Component;
use stickstate::{Device, Event, Joystick};

use std::env;
use std::thread;
use std::time::Duration;

fn scripted() -> Box<dyn Device> {
    let mut dev = ScriptedDevice::new("Scripted stick")
        .with_count(Component::Button, 2)
        .with_count(Component::Axis, 2)
        .with_count(Component::Pov, 1)
        .with_count(Component::Slider, 1);

    for i in 0..20 {
        dev.push_pass(vec![
            Event::AxisMoved(0, i * 100),
            Event::AxisMoved(1, -i * 100),
            Event::PovMoved(0, if i % 2 == 0 { 0x0001 } else { 0x0101 }),
            Event::SliderMoved(0, i, 20 - i),
            if i % 3 == 0 {
                Event::ButtonPressed(0)
            } else {
                Event::ButtonReleased(0)
            },
        ]);
    }

    Box::new(dev)
}

#[cfg(target_os = "linux")]
fn open(path: Option<String>) -> Result<Box<dyn Device>, stickstate::Error> {
    use stickstate::platform::linux::EvdevBuilder;

    match path {
        Some(path) => Ok(Box::new(EvdevBuilder::new(path).open()?)),
        None => Ok(scripted()),
    }
}

#[cfg(not(target_os = "linux"))]
fn open(_path: Option<String>) -> Result<Box<dyn Device>, stickstate::Error> {
    Ok(scripted())
}

fn main() {
    env_logger::init();

    let device = match open(env::args().nth(1)) {
        Ok(device) => device,
        Err(e) => {
            eprintln!("Failed to open device: {}", e);
            return;
        }
    };

    let mut js = Joystick::new(device);
    println!(
        "{} ({}): {} buttons, {} axes, {} povs, {} sliders",
        js.name(),
        js.uuid(),
        js.num_buttons(),
        js.num_axes(),
        js.num_povs(),
        js.num_sliders()
    );

    for _ in 0..20 {
        if let Err(e) = js.update() {
            eprintln!("Update failed: {}", e);
            break;
        }

        let buttons: Vec<_> = js.state().buttons().map(|(_, p)| p as u8).collect();
        let axes: Vec<_> = js.state().axes().map(|(_, v)| v).collect();
        let povs: Vec<_> = (0..js.num_povs())
            .map(|id| match js.pov(id) {
                Ok(dir) => dir.to_string(),
                Err(e) => e.to_string(),
            })
            .collect();
        let sliders: Vec<_> = js.state().sliders().map(|(_, x, y)| (x, y)).collect();

        println!(
            "buttons: {:?} axes: {:?} povs: {:?} sliders: {:?}",
            buttons, axes, povs, sliders
        );
        thread::sleep(Duration::from_millis(100));
    }
}
