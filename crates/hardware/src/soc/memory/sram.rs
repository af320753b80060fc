//! Static RAM with a registered read port.
//!
//! Every tick the read port latches the cell at the driven address into the output
//! register; an enabled write updates the addressed cell on the same clock edge. A read
//! issued in the same tick as a write therefore observes the pre-write contents.

use tracing::{debug, trace};

use crate::common::constants::CELL_BYTES;
use crate::common::error::{ImageError, fatal};
use crate::soc::signal::{Reg, Signal};
use crate::soc::traits::Clocked;

/// Request driven into an [`Sram`] for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SramPort {
    /// Byte address; the cell index is `addr / 8`.
    pub addr: u64,
    /// Value to store at `addr`, if the write port is enabled this tick.
    pub write: Option<u64>,
}

impl SramPort {
    /// A read-only request at `addr`.
    pub const fn read(addr: u64) -> Self {
        Self { addr, write: None }
    }

    /// A request that reads and stores `val` at `addr`.
    pub const fn write(addr: u64, val: u64) -> Self {
        Self {
            addr,
            write: Some(val),
        }
    }
}

/// Word-addressed static RAM of 64-bit cells.
#[derive(Clone, Debug)]
pub struct Sram {
    name: &'static str,
    cells: Vec<u64>,
    out: Reg<u64>,
    pending: Option<(usize, u64)>,
}

impl Sram {
    /// Creates a zero-filled memory.
    ///
    /// # Arguments
    ///
    /// * `name`  - Device name used in diagnostics.
    /// * `bytes` - Capacity in bytes; must be a non-zero multiple of the 8-byte cell.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is zero or not a multiple of 8.
    pub fn new(name: &'static str, bytes: usize) -> Self {
        if bytes == 0 || bytes as u64 % CELL_BYTES != 0 {
            fatal(
                name,
                format_args!("capacity {bytes} is not a non-zero multiple of {CELL_BYTES}"),
            );
        }
        Self {
            name,
            cells: vec![0; bytes / CELL_BYTES as usize],
            out: Reg::new(0),
            pending: None,
        }
    }

    /// Returns the device name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the capacity in bytes.
    pub fn capacity_bytes(&self) -> usize {
        self.cells.len() * CELL_BYTES as usize
    }

    /// Returns the backing cells for inspection.
    pub fn cells(&self) -> &[u64] {
        &self.cells
    }

    /// Returns the registered read-port output.
    #[inline]
    pub fn out(&self) -> u64 {
        self.out.read()
    }

    /// Returns the cell containing byte address `addr`.
    ///
    /// # Panics
    ///
    /// Panics if `addr` lies past the end of the memory.
    pub fn peek(&self, addr: u64) -> u64 {
        self.cells[self.index(addr)]
    }

    /// Drives the read port, and the write port if requested, for this tick.
    ///
    /// The output register captures the cell's current contents; the write lands on the
    /// clock edge.
    ///
    /// # Panics
    ///
    /// Panics if `port.addr` lies past the end of the memory.
    pub fn do_function(&mut self, port: SramPort) {
        let idx = self.index(port.addr);
        self.out.write(self.cells[idx]);
        self.pending = port.write.map(|val| (idx, val));
    }

    /// Overwrites the memory from `image`, starting at cell 0.
    ///
    /// Cells past the end of the image keep their contents.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::TooLarge`] if the image has more cells than the memory.
    pub fn load(&mut self, image: &[u64]) -> Result<(), ImageError> {
        if image.len() > self.cells.len() {
            return Err(ImageError::TooLarge {
                device: self.name.to_string(),
                cells: image.len(),
                capacity: self.cells.len(),
            });
        }
        self.cells[..image.len()].copy_from_slice(image);
        debug!(device = self.name, cells = image.len(), "image loaded");
        Ok(())
    }

    /// Presents the cell at `addr` on the output immediately, as if read during reset.
    ///
    /// # Panics
    ///
    /// Panics if `addr` lies past the end of the memory.
    pub fn prime(&mut self, addr: u64) {
        let val = self.cells[self.index(addr)];
        self.out.force(val);
        self.pending = None;
    }

    /// Clears the output register and any pending write. Cell contents are kept.
    pub fn reset(&mut self) {
        self.out.reset();
        self.pending = None;
    }

    fn index(&self, addr: u64) -> usize {
        let idx = addr / CELL_BYTES;
        if idx >= self.cells.len() as u64 {
            fatal(
                self.name,
                format_args!(
                    "address {addr:#x} past capacity of {} bytes",
                    self.capacity_bytes()
                ),
            );
        }
        idx as usize
    }
}

impl Clocked for Sram {
    fn on_clock_edge(&mut self) {
        self.out.on_clock_edge();
        if let Some((idx, val)) = self.pending.take() {
            trace!(device = self.name, cell = idx, val, "write");
            self.cells[idx] = val;
        }
    }
}
