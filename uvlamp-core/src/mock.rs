//! In-memory test doubles for the core's collaborators

use heapless::{String, Vec};
use uvlamp_hal::flash::{ErrorType, NorFlash, NorFlashErrorKind, ReadNorFlash, ERASED_BYTE};

use crate::state::Screen;
use crate::traits::{LampOutput, Transition, UiBackend, Widget};

/// Two erase sectors of simulated NOR flash
pub const MEM_FLASH_SIZE: usize = 8192;

/// NOR flash fake with erase-before-program semantics
///
/// Programming can only clear bits, so writing over unerased data yields the
/// AND of old and new contents, as on real parts.
pub struct MemFlash {
    pub data: [u8; MEM_FLASH_SIZE],
    pub erase_calls: usize,
    pub write_calls: usize,
    pub fail_erase: bool,
    /// Bits to flip in programmed data, to simulate a bad write
    pub corrupt_mask: u8,
}

impl MemFlash {
    pub fn new() -> Self {
        Self {
            data: [ERASED_BYTE; MEM_FLASH_SIZE],
            erase_calls: 0,
            write_calls: 0,
            fail_erase: false,
            corrupt_mask: 0,
        }
    }
}

impl ErrorType for MemFlash {
    type Error = NorFlashErrorKind;
}

impl ReadNorFlash for MemFlash {
    const READ_SIZE: usize = 1;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let start = offset as usize;
        let end = start + bytes.len();
        if end > MEM_FLASH_SIZE {
            return Err(NorFlashErrorKind::OutOfBounds);
        }
        bytes.copy_from_slice(&self.data[start..end]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        MEM_FLASH_SIZE
    }
}

impl NorFlash for MemFlash {
    const WRITE_SIZE: usize = 256;
    const ERASE_SIZE: usize = 4096;

    fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        if self.fail_erase {
            return Err(NorFlashErrorKind::Other);
        }
        let (from, to) = (from as usize, to as usize);
        if from % Self::ERASE_SIZE != 0 || to % Self::ERASE_SIZE != 0 || from > to {
            return Err(NorFlashErrorKind::NotAligned);
        }
        if to > MEM_FLASH_SIZE {
            return Err(NorFlashErrorKind::OutOfBounds);
        }
        self.erase_calls += 1;
        self.data[from..to].fill(ERASED_BYTE);
        Ok(())
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let start = offset as usize;
        if start % Self::WRITE_SIZE != 0 || bytes.len() % Self::WRITE_SIZE != 0 {
            return Err(NorFlashErrorKind::NotAligned);
        }
        let end = start + bytes.len();
        if end > MEM_FLASH_SIZE {
            return Err(NorFlashErrorKind::OutOfBounds);
        }
        self.write_calls += 1;
        for (cell, byte) in self.data[start..end].iter_mut().zip(bytes) {
            *cell &= *byte ^ self.corrupt_mask;
        }
        Ok(())
    }
}

/// Lamp output that records its state
pub struct MockOutput {
    pub power: u8,
    pub enabled: bool,
    pub enable_calls: usize,
    pub disable_calls: usize,
}

impl MockOutput {
    pub fn new() -> Self {
        Self {
            power: 0,
            enabled: false,
            enable_calls: 0,
            disable_calls: 0,
        }
    }
}

impl LampOutput for MockOutput {
    fn set_power(&mut self, percent: u8) {
        self.power = percent.min(100);
    }

    fn enable(&mut self) {
        self.enabled = true;
        self.enable_calls += 1;
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.disable_calls += 1;
    }
}

/// One recorded UI call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCall {
    Load(Screen, Transition),
    Label(Widget, String<8>),
    Arc(Widget, u8),
    Visible(Widget, bool),
}

/// UI backend that records every call
pub struct RecordingUi {
    pub calls: Vec<UiCall, 512>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    fn record(&mut self, call: UiCall) {
        self.calls.push(call).expect("RecordingUi full");
    }

    /// Last text set on `widget`
    pub fn label(&self, widget: Widget) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            UiCall::Label(w, text) if *w == widget => Some(text.as_str()),
            _ => None,
        })
    }

    /// Last value set on `widget`
    pub fn arc(&self, widget: Widget) -> Option<u8> {
        self.calls.iter().rev().find_map(|call| match call {
            UiCall::Arc(w, value) if *w == widget => Some(*value),
            _ => None,
        })
    }

    /// Last visibility set on `widget`
    pub fn visible(&self, widget: Widget) -> Option<bool> {
        self.calls.iter().rev().find_map(|call| match call {
            UiCall::Visible(w, visible) if *w == widget => Some(*visible),
            _ => None,
        })
    }

    /// Screens loaded, in order
    pub fn loads(&self) -> Vec<(Screen, Transition), 8> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                UiCall::Load(screen, transition) => Some((*screen, *transition)),
                _ => None,
            })
            .collect()
    }
}

impl UiBackend for RecordingUi {
    fn load_screen(&mut self, screen: Screen, transition: Transition) {
        self.record(UiCall::Load(screen, transition));
    }

    fn set_label_text(&mut self, widget: Widget, text: &str) {
        let mut owned = String::new();
        owned.push_str(text).expect("label text too long");
        self.record(UiCall::Label(widget, owned));
    }

    fn set_arc_value(&mut self, widget: Widget, value: u8) {
        self.record(UiCall::Arc(widget, value));
    }

    fn set_widget_visible(&mut self, widget: Widget, visible: bool) {
        self.record(UiCall::Visible(widget, visible));
    }
}
