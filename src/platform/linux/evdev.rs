// Copyright 2026 stickstate Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::ioctl::{self, input_absinfo, input_event};
use crate::ev::EventSink;
use crate::platform::{Component, Device, Error};
use crate::pov::raw;

use libc as c;
use nix::errno::Errno;
use uuid::Uuid;
use vec_map::VecMap;

use std::error;
use std::ffi::{CStr, CString};
use std::fmt::{self, Display, Formatter};
use std::mem;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::RawFd;
use std::path::{Path, PathBuf};

/// Options for opening evdev device.
///
/// ```no_run
/// use stickstate::platform::linux::EvdevBuilder;
/// use stickstate::Joystick;
///
/// let device = EvdevBuilder::new("/dev/input/event5")
///     .hats_as_povs(false)
///     .open()
///     .unwrap();
/// let js = Joystick::new(device);
/// println!("{} has {} axes", js.name(), js.num_axes());
/// ```
#[derive(Debug, Clone)]
pub struct EvdevBuilder {
    path: PathBuf,
    only_joystick_buttons: bool,
    hats_as_povs: bool,
}

impl EvdevBuilder {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        EvdevBuilder {
            path: path.as_ref().to_owned(),
            only_joystick_buttons: true,
            hats_as_povs: true,
        }
    }

    /// If `true` (default), only codes from `BTN_MISC` and `BTN_JOYSTICK` ranges are reported as
    /// buttons. Otherwise keyboard keys and mouse buttons are included too.
    pub fn only_joystick_buttons(mut self, only: bool) -> Self {
        self.only_joystick_buttons = only;
        self
    }

    /// If `true` (default), `ABS_HAT*` pairs are reported as POVs. Otherwise they are ordinary
    /// axes.
    pub fn hats_as_povs(mut self, as_povs: bool) -> Self {
        self.hats_as_povs = as_povs;
        self
    }

    pub fn open(self) -> Result<Evdev, Error> {
        Evdev::open_with(self)
    }
}

/// Joystick read from evdev device node.
///
/// Buttons and axes get ids in order of their event codes. Sliders are not reported; throttle,
/// rudder and similar controls are axes.
#[derive(Debug)]
pub struct Evdev {
    fd: RawFd,
    path: PathBuf,
    name: String,
    uuid: Uuid,
    input_id: ioctl::input_id,
    // Event code -> component id
    buttons: VecMap<usize>,
    axes: VecMap<usize>,
    // Hat number (0..4) -> component id
    hats: VecMap<usize>,
    // Last (x, y) of each POV, indexed by component id
    hat_values: Vec<(i32, i32)>,
    // Whether device has X and Y axis of each POV
    hat_halves: Vec<(bool, bool)>,
    needs_sync: bool,
    dropped: bool,
}

impl Evdev {
    /// Opens device with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        EvdevBuilder::new(path).open()
    }

    fn open_with(opts: EvdevBuilder) -> Result<Self, Error> {
        let cpath = CString::new(opts.path.as_os_str().as_bytes())
            .map_err(|e| Error::Other(Box::new(e)))?;

        let fd = unsafe { c::open(cpath.as_ptr(), c::O_RDONLY | c::O_NONBLOCK | c::O_CLOEXEC) };
        if fd < 0 {
            let errno = Errno::last();
            debug!("Failed to open {:?}: {}", opts.path, errno);
            return Err(errno_to_error(errno, "open"));
        }

        // From here fd is closed by Drop, also on error.
        let mut dev = Evdev {
            fd,
            path: opts.path,
            name: String::new(),
            uuid: Uuid::nil(),
            input_id: ioctl::input_id::default(),
            buttons: VecMap::new(),
            axes: VecMap::new(),
            hats: VecMap::new(),
            hat_values: Vec::new(),
            hat_halves: Vec::new(),
            needs_sync: true,
            dropped: false,
        };

        dev.input_id = get_input_id(fd)?;
        dev.uuid = create_uuid(dev.input_id);
        dev.name = get_name(fd).unwrap_or_else(|| {
            warn!("Failed to get name of device {:?}", dev.path);
            "Unknown".into()
        });

        let mut key_bits = [0u8; (KEY_MAX / 8) as usize + 1];
        let mut abs_bits = [0u8; (ABS_MAX / 8) as usize + 1];
        unsafe {
            ioctl::eviocgbit(fd, u32::from(EV_KEY), &mut key_bits)
                .map_err(|e| errno_to_error(e, "EVIOCGBIT(EV_KEY)"))?;
            ioctl::eviocgbit(fd, u32::from(EV_ABS), &mut abs_bits)
                .map_err(|e| errno_to_error(e, "EVIOCGBIT(EV_ABS)"))?;
        }

        for (id, code) in find_buttons(&key_bits, opts.only_joystick_buttons)
            .into_iter()
            .enumerate()
        {
            dev.buttons.insert(code as usize, id);
        }

        let (axes, hats) = find_axes(&abs_bits, opts.hats_as_povs);
        for (id, code) in axes.into_iter().enumerate() {
            dev.axes.insert(code as usize, id);
        }
        for (id, hat) in hats.into_iter().enumerate() {
            let x_code = ABS_HAT0X + 2 * hat;
            dev.hats.insert(hat as usize, id);
            dev.hat_halves
                .push((test_bit(x_code, &abs_bits), test_bit(x_code + 1, &abs_bits)));
        }
        dev.hat_values = vec![(0, 0); dev.hats.len()];

        if dev.buttons.is_empty() && dev.axes.is_empty() && dev.hats.is_empty() {
            warn!("{:?} doesn't have any buttons, axes or hats, ignoring.", dev.path);
            return Err(Error::NotJoystick(dev.path.clone()));
        }

        info!("Joystick {} ({}) opened.", dev.path.display(), dev.name);
        debug!(
            "Joystick {}: uuid: {}, buttons: {}, axes: {}, povs: {}",
            dev.path.display(),
            dev.uuid,
            dev.buttons.len(),
            dev.axes.len(),
            dev.hats.len()
        );

        Ok(dev)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn vendor_id(&self) -> u16 {
        self.input_id.vendor
    }

    pub fn product_id(&self) -> u16 {
        self.input_id.product
    }

    fn handle_event(&mut self, event: &input_event, sink: &mut dyn EventSink) -> Result<(), Error> {
        if self.dropped {
            if event.type_ == EV_SYN && event.code == SYN_REPORT {
                self.dropped = false;
                self.sync_state(sink)?;
            }
            return Ok(());
        }

        match event.type_ {
            EV_SYN if event.code == SYN_DROPPED => {
                warn!("{}: event buffer overrun, resynchronizing", self.path.display());
                self.dropped = true;
            }
            EV_KEY => {
                if let Some(&id) = self.buttons.get(event.code as usize) {
                    match event.value {
                        0 => sink.button_released(id),
                        1 => sink.button_pressed(id),
                        // Autorepeat
                        _ => (),
                    }
                }
            }
            EV_ABS => {
                if let Some((hat, is_x)) = hat_of(event.code) {
                    if let Some(&id) = self.hats.get(hat) {
                        let value = &mut self.hat_values[id];
                        if is_x {
                            value.0 = event.value;
                        } else {
                            value.1 = event.value;
                        }
                        sink.pov_moved(id, hat_to_pov(value.0, value.1));
                        return Ok(());
                    }
                }

                if let Some(&id) = self.axes.get(event.code as usize) {
                    sink.axis_moved(id, event.value);
                }
            }
            _ => trace!("Skipping event type {} code {}", event.type_, event.code),
        }

        Ok(())
    }

    /// Reports current value of every component. Used for the first capture and after
    /// `SYN_DROPPED`.
    fn sync_state(&mut self, sink: &mut dyn EventSink) -> Result<(), Error> {
        let mut key_state = [0u8; (KEY_MAX / 8) as usize + 1];
        unsafe {
            ioctl::eviocgkey(self.fd, &mut key_state)
                .map_err(|e| errno_to_error(e, "EVIOCGKEY"))?;
        }

        for (code, &id) in self.buttons.iter() {
            if test_bit(code as u16, &key_state) {
                sink.button_pressed(id);
            } else {
                sink.button_released(id);
            }
        }

        for (code, &id) in self.axes.iter() {
            sink.axis_moved(id, abs_value(self.fd, code as u16)?);
        }

        for (hat, &id) in self.hats.iter() {
            let x_code = ABS_HAT0X + 2 * hat as u16;
            let (has_x, has_y) = self.hat_halves[id];
            let x = hat_axis_value(self.fd, x_code, has_x)?;
            let y = hat_axis_value(self.fd, x_code + 1, has_y)?;
            self.hat_values[id] = (x, y);
            sink.pov_moved(id, hat_to_pov(x, y));
        }

        Ok(())
    }
}

impl Device for Evdev {
    fn component_count(&self, component: Component) -> usize {
        match component {
            Component::Button => self.buttons.len(),
            Component::Axis => self.axes.len(),
            Component::Pov => self.hats.len(),
            Component::Slider => 0,
        }
    }

    fn capture(&mut self, sink: &mut dyn EventSink) -> Result<(), Error> {
        if self.needs_sync {
            self.sync_state(sink)?;
            self.needs_sync = false;
        }

        let size = mem::size_of::<input_event>();
        let mut event_buf: [input_event; 16] = unsafe { mem::zeroed() };

        loop {
            let n = unsafe {
                c::read(
                    self.fd,
                    event_buf.as_mut_ptr() as *mut c::c_void,
                    size * event_buf.len(),
                )
            };

            if n < 0 {
                return match Errno::last() {
                    // Nothing more to read (non-blocking IO)
                    Errno::EAGAIN => Ok(()),
                    Errno::EINTR => continue,
                    errno => Err(errno_to_error(errno, "read")),
                };
            } else if n == 0 {
                return Ok(());
            } else if n as usize % size != 0 {
                error!("Unexpected read of size {} from {}", n, self.path.display());
                return Err(Error::Other(Box::new(EvdevError::PartialRead(n as usize))));
            }

            let n = n as usize / size;
            trace!("Got {} new events", n);
            for event in event_buf[..n].iter() {
                self.handle_event(event, sink)?;
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn uuid(&self) -> Uuid {
        self.uuid
    }
}

impl Drop for Evdev {
    fn drop(&mut self) {
        unsafe {
            if self.fd >= 0 {
                c::close(self.fd);
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum EvdevError {
    Errno(Errno, &'static str),
    PartialRead(usize),
}

impl Display for EvdevError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            EvdevError::Errno(e, ctx) => f.write_fmt(format_args!("{} failed: {}", ctx, e)),
            EvdevError::PartialRead(n) => {
                f.write_fmt(format_args!("read {} bytes, not a multiple of event size", n))
            }
        }
    }
}

impl error::Error for EvdevError {}

fn errno_to_error(errno: Errno, ctx: &'static str) -> Error {
    match errno {
        Errno::ENODEV => Error::Disconnected,
        _ => Error::Other(Box::new(EvdevError::Errno(errno, ctx))),
    }
}

fn get_input_id(fd: RawFd) -> Result<ioctl::input_id, Error> {
    let mut iid = ioctl::input_id::default();
    unsafe {
        ioctl::eviocgid(fd, &mut iid).map_err(|e| errno_to_error(e, "EVIOCGID"))?;
    }
    Ok(iid)
}

fn get_name(fd: RawFd) -> Option<String> {
    let mut namebuff = [0u8; 128];
    unsafe {
        ioctl::eviocgname(fd, &mut namebuff).ok()?;
    }
    CStr::from_bytes_until_nul(&namebuff)
        .ok()
        .map(|name| name.to_string_lossy().into_owned())
}

fn abs_value(fd: RawFd, code: u16) -> Result<i32, Error> {
    let mut info = input_absinfo::default();
    unsafe {
        ioctl::eviocgabs(fd, u32::from(code), &mut info)
            .map_err(|e| errno_to_error(e, "EVIOCGABS"))?;
    }
    Ok(info.value)
}

/// Half of a hat pair that device doesn't have stays centered.
fn hat_axis_value(fd: RawFd, code: u16, present: bool) -> Result<i32, Error> {
    if present {
        abs_value(fd, code)
    } else {
        Ok(0)
    }
}

/// Returns true if nth bit in array is 1.
fn test_bit(n: u16, array: &[u8]) -> bool {
    (array[(n / 8) as usize] >> (n % 8)) & 1 != 0
}

fn find_buttons(key_bits: &[u8], only_joystick_btns: bool) -> Vec<u16> {
    (0..(key_bits.len() * 8) as u16)
        .filter(|&code| {
            !only_joystick_btns || (BTN_MISC..BTN_MOUSE).contains(&code) || code >= BTN_JOYSTICK
        })
        .filter(|&code| test_bit(code, key_bits))
        .collect()
}

/// Returns axis codes and hat numbers.
fn find_axes(abs_bits: &[u8], hats_as_povs: bool) -> (Vec<u16>, Vec<u16>) {
    let mut axes = Vec::with_capacity(8);
    let mut hats = Vec::new();

    for code in 0..(abs_bits.len() * 8) as u16 {
        if !test_bit(code, abs_bits) {
            continue;
        }

        match hat_of(code) {
            Some((hat, is_x)) if hats_as_povs => {
                // Count each pair once, even when only one of its axes exists.
                let hat = hat as u16;
                if is_x || !test_bit(code - 1, abs_bits) {
                    hats.push(hat);
                }
            }
            _ => axes.push(code),
        }
    }

    (axes, hats)
}

/// Returns hat number and whether `code` is its X axis.
fn hat_of(code: u16) -> Option<(usize, bool)> {
    if (ABS_HAT0X..=ABS_HAT3Y).contains(&code) {
        let offset = code - ABS_HAT0X;
        Some(((offset / 2) as usize, offset % 2 == 0))
    } else {
        None
    }
}

/// Hat axes report -1, 0 or 1. Negative Y is up.
fn hat_to_pov(x: i32, y: i32) -> i32 {
    let mut pov = raw::CENTERED;

    if y < 0 {
        pov |= raw::NORTH;
    } else if y > 0 {
        pov |= raw::SOUTH;
    }

    if x > 0 {
        pov |= raw::EAST;
    } else if x < 0 {
        pov |= raw::WEST;
    }

    pov
}

fn create_uuid(iid: ioctl::input_id) -> Uuid {
    let bus = (u32::from(iid.bustype)).to_be();
    let vendor = iid.vendor.to_be();
    let product = iid.product.to_be();
    let version = iid.version.to_be();
    Uuid::from_fields(
        bus,
        vendor,
        0,
        &[
            (product >> 8) as u8,
            product as u8,
            0,
            0,
            (version >> 8) as u8,
            version as u8,
            0,
            0,
        ],
    )
}

const KEY_MAX: u16 = 0x2ff;
const ABS_MAX: u16 = 0x3f;

const EV_SYN: u16 = 0x00;
const EV_KEY: u16 = 0x01;
const EV_ABS: u16 = 0x03;

const SYN_REPORT: u16 = 0x00;
const SYN_DROPPED: u16 = 0x03;

const BTN_MISC: u16 = 0x100;
const BTN_MOUSE: u16 = 0x110;
const BTN_JOYSTICK: u16 = 0x120;

const ABS_HAT0X: u16 = 0x10;
const ABS_HAT3Y: u16 = 0x17;
