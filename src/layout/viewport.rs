// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

/// Zoom state for one diagram instance.
///
/// The factor is stored in integer tenths so that stepping never
/// accumulates floating-point drift: a hundred `zoom_in` calls from the
/// default land on exactly 2.0, a hundred `zoom_out` calls on exactly 0.5.
///
/// Zoom scales the rendered surface uniformly from the top-left origin;
/// model-space positions are never touched by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    tenths: u8,
}

const MIN_TENTHS: u8 = 5;
const MAX_TENTHS: u8 = 20;
const DEFAULT_TENTHS: u8 = 10;

impl Default for Viewport {
    fn default() -> Self {
        Self {
            tenths: DEFAULT_TENTHS,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps zoom up by 0.1, clamped at 2.0. A call at the limit is a no-op.
    pub fn zoom_in(&mut self) {
        if self.tenths < MAX_TENTHS {
            self.tenths += 1;
        }
    }

    /// Steps zoom down by 0.1, clamped at 0.5. A call at the limit is a no-op.
    pub fn zoom_out(&mut self) {
        if self.tenths > MIN_TENTHS {
            self.tenths -= 1;
        }
    }

    pub fn factor(&self) -> f64 {
        f64::from(self.tenths) / 10.0
    }

    /// Zoom as a whole percentage, for the status line.
    pub fn percent(&self) -> u16 {
        u16::from(self.tenths) * 10
    }

    pub fn at_max(&self) -> bool {
        self.tenths == MAX_TENTHS
    }

    pub fn at_min(&self) -> bool {
        self.tenths == MIN_TENTHS
    }
}
