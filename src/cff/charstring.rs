//! C7 — the Type 2 CharString VM.
//!
//! The interpreter walks a CharString's number/operator tape, maintaining an
//! argument stack, a pen position, and an output `PathCommand` stream. It is
//! also reused, with a small dispatch delta, by the Type 1 dialect in
//! `crate::type1`.

use std::vec::Vec;

use crate::cff::index::Index;
use crate::error::{CharStringError, DecodeError, Result};
use crate::outline::{Point, PathCommand};

/// Hard limits from §5: subroutine call depth and argument stack size.
const SUBR_CALL_LIMIT: u8 = 10;
const ARG_STACK_LIMIT: usize = 48;
const TRANSIENT_LEN: usize = 32;
/// Defeats pathological subroutine graphs that never call `return`/`endchar`.
const STEP_LIMIT: u32 = 1 << 20;

/// A fixed-capacity argument stack with "pop the oldest entry" support for
/// CFF's width-extraction idiom (§9 design notes).
struct ArgumentsStack {
    data: [f32; ARG_STACK_LIMIT],
    len: usize,
}

impl ArgumentsStack {
    fn new() -> Self {
        ArgumentsStack { data: [0.0; ARG_STACK_LIMIT], len: 0 }
    }

    fn push(&mut self, v: f32) -> Result<()> {
        if self.len >= ARG_STACK_LIMIT {
            return Err(CharStringError::StackOverflow.into());
        }
        self.data[self.len] = v;
        self.len += 1;
        Ok(())
    }

    fn pop(&mut self) -> Result<f32> {
        if self.len == 0 {
            return Err(CharStringError::StackUnderflow.into());
        }
        self.len -= 1;
        Ok(self.data[self.len])
    }

    /// Removes and returns the oldest (bottommost) entry, shifting the rest
    /// down by one. O(n) with n ≤ 48 — negligible per §9.
    fn pop_bottom(&mut self) -> Result<f32> {
        if self.len == 0 {
            return Err(CharStringError::StackUnderflow.into());
        }
        let v = self.data[0];
        for i in 1..self.len {
            self.data[i - 1] = self.data[i];
        }
        self.len -= 1;
        Ok(v)
    }

    fn at(&self, i: usize) -> f32 {
        self.data[i]
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.len = 0;
    }
}

fn calc_subroutine_bias(count: u16) -> u16 {
    if count < 1240 {
        107
    } else if count < 33900 {
        1131
    } else {
        32768
    }
}

/// Result of running a glyph's CharString program: the path and the glyph's
/// advance width (§4.7's width-extraction rule, testable property 6).
pub struct CharStringOutput {
    pub commands: Vec<PathCommand>,
    pub advance_width: f32,
}

struct Vm<'a> {
    global_subrs: &'a Index<'a>,
    local_subrs: &'a Index<'a>,
    global_bias: u16,
    local_bias: u16,
    nominal_width_x: f32,
    default_width_x: f32,

    stack: ArgumentsStack,
    x: f32,
    y: f32,
    width: Option<f32>,
    n_stems: u32,
    transient: [f32; TRANSIENT_LEN],
    commands: Vec<PathCommand>,
    open_path: bool,
    step_count: u32,
    rng: u32,
}

pub fn run(
    char_string: &[u8],
    global_subrs: &Index,
    local_subrs: &Index,
    nominal_width_x: f32,
    default_width_x: f32,
) -> Result<CharStringOutput> {
    let mut vm = Vm {
        global_subrs,
        local_subrs,
        global_bias: calc_subroutine_bias(global_subrs.len()),
        local_bias: calc_subroutine_bias(local_subrs.len()),
        nominal_width_x,
        default_width_x,
        stack: ArgumentsStack::new(),
        x: 0.0,
        y: 0.0,
        width: None,
        n_stems: 0,
        transient: [0.0; TRANSIENT_LEN],
        commands: Vec::new(),
        open_path: false,
        step_count: 0,
        rng: 0x9E37_79B9,
    };

    exec(&mut vm, char_string, 0)?;

    if !vm.commands.is_empty() {
        vm.commands.push(PathCommand::Close);
    }

    let advance_width = vm.width.unwrap_or(vm.default_width_x);

    Ok(CharStringOutput { commands: vm.commands, advance_width })
}

/// Returns `Ok(true)` if `endchar` halted execution (propagated up through
/// every caller frame so subroutine calls can stop the whole program).
fn exec(vm: &mut Vm, data: &[u8], depth: u8) -> Result<bool> {
    let mut i = 0usize;

    while i < data.len() {
        vm.step_count += 1;
        if vm.step_count > STEP_LIMIT {
            return Err(CharStringError::InterpreterLimit.into());
        }

        let b0 = data[i];

        if b0 >= 32 || b0 == 28 {
            let (value, consumed) = parse_number(&data[i..])?;
            vm.stack.push(value)?;
            i += consumed;
            continue;
        }

        i += 1;

        match b0 {
            1 | 3 | 18 | 23 => {
                take_width_if_odd(vm)?;
                vm.n_stems += vm.stack.len() as u32 / 2;
                vm.stack.clear();
            }
            4 => {
                if vm.stack.len() > 1 {
                    take_width_from_bottom(vm)?;
                }
                let dy = vm.stack.pop_bottom()?;
                vm.y += dy;
                move_to(vm);
            }
            5 => {
                while vm.stack.len() >= 2 {
                    let dx = vm.stack.pop_bottom()?;
                    let dy = vm.stack.pop_bottom()?;
                    vm.x += dx;
                    vm.y += dy;
                    line_to(vm);
                }
                vm.stack.clear();
            }
            6 | 7 => {
                let mut horizontal = b0 == 6;
                while vm.stack.len() >= 1 {
                    let d = vm.stack.pop_bottom()?;
                    if horizontal {
                        vm.x += d;
                    } else {
                        vm.y += d;
                    }
                    line_to(vm);
                    horizontal = !horizontal;
                }
                vm.stack.clear();
            }
            8 => {
                while vm.stack.len() >= 6 {
                    curve_from_stack(vm)?;
                }
                vm.stack.clear();
            }
            10 => {
                let idx = vm.stack.pop()? as i32 + i32::from(vm.local_bias);
                call_subr(vm, Subrs::Local, idx, depth)?;
            }
            11 => return Ok(false),
            12 => {
                let b1 = *data.get(i).ok_or(DecodeError::CharString(CharStringError::UnknownOperator))?;
                i += 1;
                if exec_escape(vm, b1)? {
                    return Ok(true);
                }
            }
            14 => {
                if !vm.stack.is_empty() {
                    take_width_from_bottom(vm)?;
                }
                return Ok(true);
            }
            19 | 20 => {
                take_width_if_odd(vm)?;
                vm.n_stems += vm.stack.len() as u32 / 2;
                vm.stack.clear();
                let mask_bytes = ((vm.n_stems + 7) / 8) as usize;
                i += mask_bytes;
            }
            21 => {
                if vm.stack.len() > 2 {
                    take_width_from_bottom(vm)?;
                }
                let dx = vm.stack.pop_bottom()?;
                let dy = vm.stack.pop_bottom()?;
                vm.x += dx;
                vm.y += dy;
                move_to(vm);
            }
            22 => {
                if vm.stack.len() > 1 {
                    take_width_from_bottom(vm)?;
                }
                let dx = vm.stack.pop_bottom()?;
                vm.x += dx;
                move_to(vm);
            }
            24 => {
                while vm.stack.len() >= 8 {
                    curve_from_stack(vm)?;
                }
                if vm.stack.len() >= 2 {
                    let dx = vm.stack.pop_bottom()?;
                    let dy = vm.stack.pop_bottom()?;
                    vm.x += dx;
                    vm.y += dy;
                    line_to(vm);
                }
                vm.stack.clear();
            }
            25 => {
                while vm.stack.len() >= 8 {
                    let dx = vm.stack.pop_bottom()?;
                    let dy = vm.stack.pop_bottom()?;
                    vm.x += dx;
                    vm.y += dy;
                    line_to(vm);
                }
                if vm.stack.len() >= 6 {
                    curve_from_stack(vm)?;
                }
                vm.stack.clear();
            }
            26 => {
                if vm.stack.len() % 4 == 1 {
                    let dx = vm.stack.pop_bottom()?;
                    vm.x += dx;
                }
                while vm.stack.len() >= 4 {
                    let dy1 = vm.stack.pop_bottom()?;
                    let dx2 = vm.stack.pop_bottom()?;
                    let dy2 = vm.stack.pop_bottom()?;
                    let dy3 = vm.stack.pop_bottom()?;
                    let c1 = Point::new(f64::from(vm.x), f64::from(vm.y + dy1));
                    let c2 = Point::new(c1.x + f64::from(dx2), c1.y + f64::from(dy2));
                    let p = Point::new(c2.x, c2.y + f64::from(dy3));
                    vm.x = p.x as f32;
                    vm.y = p.y as f32;
                    vm.commands.push(PathCommand::CubicBezier { c1, c2, p });
                }
                vm.stack.clear();
            }
            27 => {
                if vm.stack.len() % 4 == 1 {
                    let dy = vm.stack.pop_bottom()?;
                    vm.y += dy;
                }
                while vm.stack.len() >= 4 {
                    let dx1 = vm.stack.pop_bottom()?;
                    let dx2 = vm.stack.pop_bottom()?;
                    let dy2 = vm.stack.pop_bottom()?;
                    let dx3 = vm.stack.pop_bottom()?;
                    let c1 = Point::new(f64::from(vm.x + dx1), f64::from(vm.y));
                    let c2 = Point::new(c1.x + f64::from(dx2), c1.y + f64::from(dy2));
                    let p = Point::new(c2.x + f64::from(dx3), c2.y);
                    vm.x = p.x as f32;
                    vm.y = p.y as f32;
                    vm.commands.push(PathCommand::CubicBezier { c1, c2, p });
                }
                vm.stack.clear();
            }
            29 => {
                let idx = vm.stack.pop()? as i32 + i32::from(vm.global_bias);
                call_subr(vm, Subrs::Global, idx, depth)?;
            }
            30 | 31 => {
                exec_alternating_curve(vm, b0 == 31)?;
            }
            _ => return Err(CharStringError::UnknownOperator.into()),
        }
    }

    Ok(false)
}

enum Subrs {
    Local,
    Global,
}

fn call_subr(vm: &mut Vm, which: Subrs, idx: i32, depth: u8) -> Result<()> {
    if depth >= SUBR_CALL_LIMIT {
        return Err(CharStringError::SubrOverflow.into());
    }
    if idx < 0 {
        return Err(CharStringError::UnknownOperator.into());
    }
    // `Index::get` returns a slice borrowed from the CharString data itself
    // (lifetime `'a`, independent of `&Vm`), so this doesn't alias the `&mut
    // vm` passed into the recursive `exec` call below.
    let bytes = match which {
        Subrs::Local => vm.local_subrs.get(idx as u16),
        Subrs::Global => vm.global_subrs.get(idx as u16),
    }
    .ok_or(CharStringError::UnknownOperator)?;
    exec(vm, bytes, depth + 1)?;
    Ok(())
}

fn exec_alternating_curve(vm: &mut Vm, start_horizontal: bool) -> Result<()> {
    let mut horizontal = start_horizontal;
    while vm.stack.len() >= 4 {
        let last = vm.stack.len() == 5;
        if horizontal {
            let dx1 = vm.stack.pop_bottom()?;
            let dx2 = vm.stack.pop_bottom()?;
            let dy2 = vm.stack.pop_bottom()?;
            let dy3 = vm.stack.pop_bottom()?;
            let dxf = if last { vm.stack.pop_bottom()? } else { 0.0 };
            let c1 = Point::new(f64::from(vm.x + dx1), f64::from(vm.y));
            let c2 = Point::new(c1.x + f64::from(dx2), c1.y + f64::from(dy2));
            let p = Point::new(c2.x + f64::from(dxf), c2.y + f64::from(dy3));
            vm.x = p.x as f32;
            vm.y = p.y as f32;
            vm.commands.push(PathCommand::CubicBezier { c1, c2, p });
        } else {
            let dy1 = vm.stack.pop_bottom()?;
            let dx2 = vm.stack.pop_bottom()?;
            let dy2 = vm.stack.pop_bottom()?;
            let dx3 = vm.stack.pop_bottom()?;
            let dyf = if last { vm.stack.pop_bottom()? } else { 0.0 };
            let c1 = Point::new(f64::from(vm.x), f64::from(vm.y + dy1));
            let c2 = Point::new(c1.x + f64::from(dx2), c1.y + f64::from(dy2));
            let p = Point::new(c2.x + f64::from(dx3), c2.y + f64::from(dyf));
            vm.x = p.x as f32;
            vm.y = p.y as f32;
            vm.commands.push(PathCommand::CubicBezier { c1, c2, p });
        }
        horizontal = !horizontal;
    }
    vm.stack.clear();
    Ok(())
}

fn curve_from_stack(vm: &mut Vm) -> Result<()> {
    let dx1 = vm.stack.pop_bottom()?;
    let dy1 = vm.stack.pop_bottom()?;
    let dx2 = vm.stack.pop_bottom()?;
    let dy2 = vm.stack.pop_bottom()?;
    let dx3 = vm.stack.pop_bottom()?;
    let dy3 = vm.stack.pop_bottom()?;
    let c1 = Point::new(f64::from(vm.x + dx1), f64::from(vm.y + dy1));
    let c2 = Point::new(c1.x + f64::from(dx2), c1.y + f64::from(dy2));
    let p = Point::new(c2.x + f64::from(dx3), c2.y + f64::from(dy3));
    vm.x = p.x as f32;
    vm.y = p.y as f32;
    vm.commands.push(PathCommand::CubicBezier { c1, c2, p });
    Ok(())
}

fn move_to(vm: &mut Vm) {
    if vm.open_path {
        vm.commands.push(PathCommand::Close);
    }
    vm.commands.push(PathCommand::MoveTo { p: Point::new(f64::from(vm.x), f64::from(vm.y)) });
    vm.open_path = true;
}

fn line_to(vm: &mut Vm) {
    vm.commands.push(PathCommand::LineTo { p: Point::new(f64::from(vm.x), f64::from(vm.y)) });
}

/// Width is extracted at most once per glyph (§4.7); subsequent calls with
/// an "odd" stack are therefore ignored once `vm.width` is set.
fn take_width_if_odd(vm: &mut Vm) -> Result<()> {
    if vm.width.is_none() && vm.stack.len() % 2 == 1 {
        take_width_from_bottom(vm)?;
    }
    Ok(())
}

fn take_width_from_bottom(vm: &mut Vm) -> Result<()> {
    if vm.width.is_none() {
        let raw = vm.stack.pop_bottom()?;
        vm.width = Some(raw + vm.nominal_width_x);
    }
    Ok(())
}

fn parse_number(data: &[u8]) -> Result<(f32, usize)> {
    let b0 = data[0];
    match b0 {
        32..=246 => Ok((f32::from(b0 as i32 as i16 - 139), 1)),
        247..=250 => {
            let b1 = *data.get(1).ok_or(CharStringError::BadWidth)?;
            Ok((((i32::from(b0) - 247) * 256 + i32::from(b1) + 108) as f32, 2))
        }
        251..=254 => {
            let b1 = *data.get(1).ok_or(CharStringError::BadWidth)?;
            Ok(((-(i32::from(b0) - 251) * 256 - i32::from(b1) - 108) as f32, 2))
        }
        28 => {
            let bytes = data.get(1..3).ok_or(CharStringError::BadWidth)?;
            let v = i16::from_be_bytes([bytes[0], bytes[1]]);
            Ok((f32::from(v), 3))
        }
        255 => {
            let bytes = data.get(1..5).ok_or(CharStringError::BadWidth)?;
            let v = i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            Ok((v as f32 / 65536.0, 5))
        }
        _ => Err(CharStringError::UnknownOperator.into()),
    }
}

fn exec_escape(vm: &mut Vm, code: u8) -> Result<bool> {
    match code {
        3 => {
            let b = vm.stack.pop()?;
            let a = vm.stack.pop()?;
            vm.stack.push(bool_f32(a != 0.0 && b != 0.0))?;
        }
        4 => {
            let b = vm.stack.pop()?;
            let a = vm.stack.pop()?;
            vm.stack.push(bool_f32(a != 0.0 || b != 0.0))?;
        }
        5 => {
            let a = vm.stack.pop()?;
            vm.stack.push(bool_f32(a == 0.0))?;
        }
        9 => {
            let a = vm.stack.pop()?;
            vm.stack.push(a.abs())?;
        }
        10 => {
            let b = vm.stack.pop()?;
            let a = vm.stack.pop()?;
            vm.stack.push(a + b)?;
        }
        11 => {
            let b = vm.stack.pop()?;
            let a = vm.stack.pop()?;
            vm.stack.push(a - b)?;
        }
        12 => {
            let b = vm.stack.pop()?;
            let a = vm.stack.pop()?;
            vm.stack.push(if b != 0.0 { a / b } else { 0.0 })?;
        }
        14 => {
            let a = vm.stack.pop()?;
            vm.stack.push(-a)?;
        }
        15 => {
            let b = vm.stack.pop()?;
            let a = vm.stack.pop()?;
            vm.stack.push(bool_f32((a - b).abs() < f32::EPSILON))?;
        }
        18 => {
            vm.stack.pop()?;
        }
        20 => {
            let idx = vm.stack.pop()? as usize;
            let val = vm.stack.pop()?;
            if let Some(slot) = vm.transient.get_mut(idx) {
                *slot = val;
            }
        }
        21 => {
            let idx = vm.stack.pop()? as usize;
            let val = vm.transient.get(idx).copied().unwrap_or(0.0);
            vm.stack.push(val)?;
        }
        22 => {
            let v2 = vm.stack.pop()?;
            let s2 = vm.stack.pop()?;
            let s1 = vm.stack.pop()?;
            let v1 = vm.stack.pop()?;
            vm.stack.push(if v1 <= v2 { s1 } else { s2 })?;
        }
        23 => {
            // Deterministic PRNG; callers MUST NOT depend on specific values.
            vm.rng = vm.rng.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let v = ((vm.rng >> 8) as f32 / 16_777_216.0).max(f32::MIN_POSITIVE);
            vm.stack.push(v)?;
        }
        24 => {
            let b = vm.stack.pop()?;
            let a = vm.stack.pop()?;
            vm.stack.push(a * b)?;
        }
        26 => {
            let a = vm.stack.pop()?;
            vm.stack.push(a.max(0.0).sqrt())?;
        }
        27 => {
            let a = vm.stack.pop()?;
            vm.stack.push(a)?;
            vm.stack.push(a)?;
        }
        28 => {
            let b = vm.stack.pop()?;
            let a = vm.stack.pop()?;
            vm.stack.push(b)?;
            vm.stack.push(a)?;
        }
        29 => {
            let n = vm.stack.pop()? as i32;
            let len = vm.stack.len();
            if len == 0 {
                return Err(CharStringError::StackUnderflow.into());
            }
            let n = n.clamp(0, len as i32 - 1) as usize;
            let v = vm.stack.at(len - 1 - n);
            vm.stack.push(v)?;
        }
        30 => {
            let j = vm.stack.pop()? as i32;
            let n = vm.stack.pop()? as i32;
            roll(vm, n, j)?;
        }
        34 => exec_hflex(vm)?,
        35 => exec_flex(vm)?,
        36 => exec_hflex1(vm)?,
        37 => exec_flex1(vm)?,
        _ => return Err(CharStringError::UnknownOperator.into()),
    }
    Ok(false)
}

fn bool_f32(b: bool) -> f32 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Rotates the top `n` stack elements by `j` positions; negative `j`
/// normalized per the resolved Open Question on `roll`'s direction (DESIGN.md).
fn roll(vm: &mut Vm, n: i32, j: i32) -> Result<()> {
    if n <= 0 {
        return Ok(());
    }
    let n = (n as usize).min(vm.stack.len());
    if n == 0 {
        return Ok(());
    }
    let start = vm.stack.len() - n;
    let slice = &mut vm.stack.data[start..start + n];
    let j = ((j % n as i32) + n as i32) % n as i32;
    slice.rotate_left(j as usize);
    Ok(())
}

fn exec_hflex(vm: &mut Vm) -> Result<()> {
    let dx1 = vm.stack.pop_bottom()?;
    let dx2 = vm.stack.pop_bottom()?;
    let dy2 = vm.stack.pop_bottom()?;
    let dx3 = vm.stack.pop_bottom()?;
    let dx4 = vm.stack.pop_bottom()?;
    let dx5 = vm.stack.pop_bottom()?;
    let dx6 = vm.stack.pop_bottom()?;
    vm.stack.clear();

    let start_y = vm.y;
    let c1 = Point::new(f64::from(vm.x + dx1), f64::from(vm.y));
    let c2 = Point::new(c1.x + f64::from(dx2), c1.y + f64::from(dy2));
    let p1 = Point::new(c2.x + f64::from(dx3), c2.y);
    let c3 = Point::new(p1.x + f64::from(dx4), p1.y);
    let c4 = Point::new(c3.x + f64::from(dx5), f64::from(start_y));
    let p2 = Point::new(c4.x + f64::from(dx6), f64::from(start_y));

    vm.commands.push(PathCommand::CubicBezier { c1, c2, p: p1 });
    vm.commands.push(PathCommand::CubicBezier { c1: c3, c2: c4, p: p2 });
    vm.x = p2.x as f32;
    vm.y = p2.y as f32;
    Ok(())
}

fn exec_flex(vm: &mut Vm) -> Result<()> {
    let dx1 = vm.stack.pop_bottom()?;
    let dy1 = vm.stack.pop_bottom()?;
    let dx2 = vm.stack.pop_bottom()?;
    let dy2 = vm.stack.pop_bottom()?;
    let dx3 = vm.stack.pop_bottom()?;
    let dy3 = vm.stack.pop_bottom()?;
    let dx4 = vm.stack.pop_bottom()?;
    let dy4 = vm.stack.pop_bottom()?;
    let dx5 = vm.stack.pop_bottom()?;
    let dy5 = vm.stack.pop_bottom()?;
    let dx6 = vm.stack.pop_bottom()?;
    let dy6 = vm.stack.pop_bottom()?;
    let _fd = vm.stack.pop_bottom()?; // flex height, unused by the outline
    vm.stack.clear();

    let c1 = Point::new(f64::from(vm.x + dx1), f64::from(vm.y + dy1));
    let c2 = Point::new(c1.x + f64::from(dx2), c1.y + f64::from(dy2));
    let p1 = Point::new(c2.x + f64::from(dx3), c2.y + f64::from(dy3));
    let c3 = Point::new(p1.x + f64::from(dx4), p1.y + f64::from(dy4));
    let c4 = Point::new(c3.x + f64::from(dx5), c3.y + f64::from(dy5));
    let p2 = Point::new(c4.x + f64::from(dx6), c4.y + f64::from(dy6));

    vm.commands.push(PathCommand::CubicBezier { c1, c2, p: p1 });
    vm.commands.push(PathCommand::CubicBezier { c1: c3, c2: c4, p: p2 });
    vm.x = p2.x as f32;
    vm.y = p2.y as f32;
    Ok(())
}

fn exec_hflex1(vm: &mut Vm) -> Result<()> {
    let dx1 = vm.stack.pop_bottom()?;
    let dy1 = vm.stack.pop_bottom()?;
    let dx2 = vm.stack.pop_bottom()?;
    let dy2 = vm.stack.pop_bottom()?;
    let dx3 = vm.stack.pop_bottom()?;
    let dx4 = vm.stack.pop_bottom()?;
    let dx5 = vm.stack.pop_bottom()?;
    let dy5 = vm.stack.pop_bottom()?;
    let dx6 = vm.stack.pop_bottom()?;
    vm.stack.clear();

    let start_y = vm.y;
    let c1 = Point::new(f64::from(vm.x + dx1), f64::from(vm.y + dy1));
    let c2 = Point::new(c1.x + f64::from(dx2), c1.y + f64::from(dy2));
    let p1 = Point::new(c2.x + f64::from(dx3), c2.y);
    let c3 = Point::new(p1.x + f64::from(dx4), p1.y);
    let c4 = Point::new(c3.x + f64::from(dx5), c3.y + f64::from(dy5));
    let dy6 = f64::from(start_y) - c4.y;
    let p2 = Point::new(c4.x + f64::from(dx6), c4.y + dy6);

    vm.commands.push(PathCommand::CubicBezier { c1, c2, p: p1 });
    vm.commands.push(PathCommand::CubicBezier { c1: c3, c2: c4, p: p2 });
    vm.x = p2.x as f32;
    vm.y = p2.y as f32;
    Ok(())
}

fn exec_flex1(vm: &mut Vm) -> Result<()> {
    let dx1 = vm.stack.pop_bottom()?;
    let dy1 = vm.stack.pop_bottom()?;
    let dx2 = vm.stack.pop_bottom()?;
    let dy2 = vm.stack.pop_bottom()?;
    let dx3 = vm.stack.pop_bottom()?;
    let dy3 = vm.stack.pop_bottom()?;
    let dx4 = vm.stack.pop_bottom()?;
    let dy4 = vm.stack.pop_bottom()?;
    let dx5 = vm.stack.pop_bottom()?;
    let dy5 = vm.stack.pop_bottom()?;
    let d6 = vm.stack.pop_bottom()?;
    vm.stack.clear();

    let start_x = vm.x;
    let start_y = vm.y;
    let sum_dx = dx1 + dx2 + dx3 + dx4 + dx5;
    let sum_dy = dy1 + dy2 + dy3 + dy4 + dy5;

    let c1 = Point::new(f64::from(vm.x + dx1), f64::from(vm.y + dy1));
    let c2 = Point::new(c1.x + f64::from(dx2), c1.y + f64::from(dy2));
    let p1 = Point::new(c2.x + f64::from(dx3), c2.y + f64::from(dy3));
    let c3 = Point::new(p1.x + f64::from(dx4), p1.y + f64::from(dy4));
    let c4 = Point::new(c3.x + f64::from(dx5), c3.y + f64::from(dy5));

    let p2 = if sum_dx.abs() > sum_dy.abs() {
        Point::new(c4.x + f64::from(d6), f64::from(start_y))
    } else {
        Point::new(f64::from(start_x), c4.y + f64::from(d6))
    };

    vm.commands.push(PathCommand::CubicBezier { c1, c2, p: p1 });
    vm.commands.push(PathCommand::CubicBezier { c1: c3, c2: c4, p: p2 });
    vm.x = p2.x as f32;
    vm.y = p2.y as f32;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cff::index::parse_index;
    use crate::parser::Stream;

    fn empty_index() -> Index<'static> {
        let data: &'static [u8] = &[0, 0]; // count = 0
        let mut s = Stream::new(data);
        parse_index(&mut s).unwrap()
    }

    #[test]
    fn even_stack_endchar_uses_default_width() {
        // `8b 8b 0e` = push(0) push(0) endchar; even count -> default width.
        let global = empty_index();
        let local = empty_index();
        let out = run(&[0x8b, 0x8b, 0x0e], &global, &local, 250.0, 500.0).unwrap();
        assert_eq!(out.advance_width, 500.0);
    }

    #[test]
    fn odd_stack_endchar_extracts_width() {
        // `f8 00 8b 0e`: 0xf8 encodes (0xf8-247)*256+0+108 = 364; plus 8b=0 -> odd count (2)? recompute below.
        let global = empty_index();
        let local = empty_index();
        // single operand (364) then endchar -> odd count(1) -> width = 364 + nominal(250) = 614
        let out = run(&[0xf8, 0x00, 0x0e], &global, &local, 250.0, 500.0).unwrap();
        assert_eq!(out.advance_width, 614.0);
    }

    #[test]
    fn stack_overflow_is_an_error() {
        let global = empty_index();
        let local = empty_index();
        let mut program = Vec::new();
        for _ in 0..60 {
            program.push(0x8bu8); // push 0
        }
        program.push(0x0e); // endchar
        let err = run(&program, &global, &local, 0.0, 0.0);
        assert!(err.is_err());
    }
}
