//! In-memory bus for unit tests. Records every call and plays back scripted replies.

use core::fmt;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use crate::transport::{Bus, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StubIoError;

#[derive(Debug, Default)]
pub(crate) struct StubState {
    pub fail_open: bool,
    pub fail_bind: bool,
    /// Report one byte fewer than asked for on writes.
    pub short_write: bool,
    /// Report one byte fewer than asked for on reads.
    pub short_read: bool,
    pub io_error: bool,
    pub responses: VecDeque<Vec<u8>>,

    pub opens: usize,
    pub binds: Vec<u8>,
    pub releases: usize,
    pub writes: Vec<Vec<u8>>,
    pub reads: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct StubBus(Rc<RefCell<StubState>>);

impl StubBus {
    pub fn state(&self) -> Ref<'_, StubState> {
        self.0.borrow()
    }

    pub fn state_mut(&self) -> RefMut<'_, StubState> {
        self.0.borrow_mut()
    }

    /// Queues the bytes the next read hands back.
    pub fn respond(&self, bytes: &[u8]) {
        self.state_mut().responses.push_back(bytes.to_vec());
    }
}

impl fmt::Display for StubBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stub bus")
    }
}

#[derive(Debug)]
pub(crate) struct StubTransport(Rc<RefCell<StubState>>);

impl Bus for StubBus {
    type Transport = StubTransport;
    type Error = StubIoError;

    fn open_device(&mut self) -> Result<StubTransport, StubIoError> {
        let mut state = self.state_mut();
        if state.fail_open {
            return Err(StubIoError);
        }
        state.opens += 1;
        Ok(StubTransport(self.0.clone()))
    }

    fn bind_address(&mut self, _transport: &mut StubTransport, address: u8) -> Result<(), StubIoError> {
        let mut state = self.state_mut();
        if state.fail_bind {
            return Err(StubIoError);
        }
        state.binds.push(address);
        Ok(())
    }

    fn release(&mut self, _transport: StubTransport) {
        self.state_mut().releases += 1;
    }
}

impl Transport for StubTransport {
    type Error = StubIoError;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, StubIoError> {
        let mut state = self.0.borrow_mut();
        state.writes.push(bytes.to_vec());
        if state.io_error {
            return Err(StubIoError);
        }
        if state.short_write {
            return Ok(bytes.len() - 1);
        }
        Ok(bytes.len())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StubIoError> {
        let mut state = self.0.borrow_mut();
        state.reads.push(buffer.len());
        if state.io_error {
            return Err(StubIoError);
        }
        let response = state.responses.pop_front().unwrap_or_default();
        let len = response.len().min(buffer.len());
        buffer[..len].copy_from_slice(&response[..len]);
        if state.short_read {
            return Ok(buffer.len() - 1);
        }
        Ok(buffer.len())
    }
}
