//! Persistent brightness profiles.
//!
//! Profiles 1-4 are stored one byte each at consecutive storage offsets.
//! Index 0 is the reserved "off" profile: it always reads as brightness 0
//! and cannot be written.

use embedded_storage::Storage;

use crate::config::ProfileLayout;
use crate::error::Error;

/// Number of user profiles
pub const PROFILE_COUNT: u8 = 4;

/// Value of a never-written storage byte
const ERASED: u8 = 0xFF;

/// Maps profile indices to persisted brightness bytes
pub struct ProfileStore<S> {
    storage: S,
    layout: ProfileLayout,
}

impl<S: Storage> ProfileStore<S> {
    pub const fn new(storage: S, layout: ProfileLayout) -> Self {
        Self { storage, layout }
    }

    /// Brightness stored for `index`
    pub fn get(&mut self, index: u8) -> Result<u8, Error> {
        if index == 0 {
            return Ok(0);
        }
        let address = self.address(index)?;
        let mut byte = [0u8];
        self.storage
            .read(address, &mut byte)
            .map_err(Error::storage)?;
        Ok(byte[0])
    }

    /// Persist `value` as the brightness of `index`.
    ///
    /// Every call is a non-volatile write, so this must not be called in a
    /// loop.
    pub fn set(&mut self, index: u8, value: u8) -> Result<(), Error> {
        if index == 0 {
            return Err(Error::InvalidProfile(index));
        }
        let address = self.address(index)?;
        self.storage
            .write(address, &[value])
            .map_err(Error::storage)
    }

    /// All four profiles in index order
    pub fn profiles(&mut self) -> Result<[u8; PROFILE_COUNT as usize], Error> {
        let mut profiles = [0u8; PROFILE_COUNT as usize];
        for (index, slot) in (1..=PROFILE_COUNT).zip(profiles.iter_mut()) {
            *slot = self.get(index)?;
        }
        Ok(profiles)
    }

    /// Write the factory profiles if storage is blank.
    ///
    /// Storage counts as blank only when all four bytes read as erased, so
    /// calling this again after any profile was set writes nothing.
    /// Returns whether the defaults were written.
    pub fn ensure_defaults(&mut self) -> Result<bool, Error> {
        let profiles = self.profiles()?;
        if profiles.iter().any(|&value| value != ERASED) {
            return Ok(false);
        }

        log!("profile storage is blank, writing defaults");
        let defaults = self.layout.defaults;
        for (index, value) in (1..=PROFILE_COUNT).zip(defaults) {
            self.set(index, value)?;
        }
        Ok(true)
    }

    fn address(&self, index: u8) -> Result<u32, Error> {
        if index == 0 || index > PROFILE_COUNT {
            return Err(Error::InvalidProfile(index));
        }
        Ok(self.layout.base_address + u32::from(index - 1))
    }
}
