// Copyright 2026 stickstate Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

// Layouts and request codes from linux/input.h. They are the same on every architecture we
// build for, so no conditional compilation here.

#![allow(non_camel_case_types)]

use libc::c_int;
use nix::errno::Errno;
use nix::{ioctl_read, ioctl_read_buf, request_code_read};

use std::mem;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct input_id {
    pub bustype: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct input_absinfo {
    pub value: i32,
    pub minimum: i32,
    pub maximum: i32,
    pub fuzz: i32,
    pub flat: i32,
    pub resolution: i32,
}

#[repr(C)]
#[derive(Copy, Clone)]
pub struct input_event {
    pub time: libc::timeval,
    pub type_: u16,
    pub code: u16,
    pub value: i32,
}

ioctl_read!(eviocgid, b'E', 0x02, input_id);
ioctl_read_buf!(eviocgname, b'E', 0x06, u8);
ioctl_read_buf!(eviocgkey, b'E', 0x18, u8);

/// EVIOCGBIT(ev, len). Request number depends on `ev`, so it can't be generated by nix macros.
pub unsafe fn eviocgbit(fd: c_int, ev: u32, buf: &mut [u8]) -> nix::Result<c_int> {
    let res = libc::ioctl(
        fd,
        request_code_read!(b'E', 0x20 + ev, buf.len()),
        buf.as_mut_ptr(),
    );
    Errno::result(res)
}

/// EVIOCGABS(abs).
pub unsafe fn eviocgabs(fd: c_int, abs: u32, info: &mut input_absinfo) -> nix::Result<c_int> {
    let res = libc::ioctl(
        fd,
        request_code_read!(b'E', 0x40 + abs, mem::size_of::<input_absinfo>()),
        info as *mut input_absinfo,
    );
    Errno::result(res)
}
