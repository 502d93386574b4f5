//! Seed message layout
//!
//! The DS builds a 16-word message from version constants, hardware
//! counters and the RTC, then hashes it with SHA-1. Words are stored in
//! little-endian byte order and read back big-endian by the hash.
//!
//! | word  | content                                   |
//! |-------|-------------------------------------------|
//! | 0-4   | Nazo values                               |
//! | 5     | `VCount << 16 \| Timer0`                  |
//! | 6     | `LowerMac << 16 ^ TickCount`              |
//! | 7     | `UpperMac ^ VFrame ^ GxStat`              |
//! | 8     | weekday, day, month, year (BCD)           |
//! | 9     | second, minute, hour (BCD, PM flag)       |
//! | 10-15 | input state, padding and length           |

use crate::constants::{MESSAGE_SIZE, MESSAGE_TAIL};
use crate::domain::datetime::GameDateTime;
use crate::domain::parameters::{GameVersion, MacAddress};
use crate::domain::seed_state::SeedState;
use crate::domain::sha1::hash_block;
use byteorder::{ByteOrder, LittleEndian};

/// One SHA-1 block in the seed message layout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedMessage {
    bytes: [u8; MESSAGE_SIZE],
}

impl SeedMessage {
    /// Message with version constants and fixed tail filled in
    pub fn new(version: GameVersion) -> Self {
        let mut bytes = [0u8; MESSAGE_SIZE];
        LittleEndian::write_u32_into(&version.nazo(), &mut bytes[..20]);
        bytes[40..].copy_from_slice(&MESSAGE_TAIL);
        Self { bytes }
    }

    /// Message for the hardware state of an existing candidate
    pub fn for_state(mac: MacAddress, version: GameVersion, state: &SeedState) -> Self {
        let mut message = Self::new(version);
        message.set_vcount_timer0(state.vcount, state.timer0);
        message.set_tick_count(mac, state.tick_count);
        message.set_vframe(mac, state.vframe, state.gx_stat);
        message.set_datetime(&state.datetime);
        message
    }

    #[inline]
    fn set_word(&mut self, index: usize, value: u32) {
        LittleEndian::write_u32(&mut self.bytes[index * 4..index * 4 + 4], value);
    }

    /// Read back a message word
    pub fn word(&self, index: usize) -> u32 {
        LittleEndian::read_u32(&self.bytes[index * 4..index * 4 + 4])
    }

    /// Word 5
    #[inline]
    pub fn set_vcount_timer0(&mut self, vcount: u16, timer0: u16) {
        self.set_word(5, ((vcount as u32) << 16) | timer0 as u32);
    }

    /// Word 6
    #[inline]
    pub fn set_tick_count(&mut self, mac: MacAddress, tick_count: u32) {
        self.set_word(6, ((mac.lower() as u32) << 16) ^ tick_count);
    }

    /// Word 7
    #[inline]
    pub fn set_vframe(&mut self, mac: MacAddress, vframe: u32, gx_stat: u32) {
        self.set_word(7, mac.upper() ^ vframe ^ gx_stat);
    }

    /// Words 8 and 9
    #[inline]
    pub fn set_datetime(&mut self, datetime: &GameDateTime) {
        self.set_word(8, datetime.date.to_message_word());
        self.set_word(9, datetime.time.to_message_word());
    }

    pub fn bytes(&self) -> &[u8; MESSAGE_SIZE] {
        &self.bytes
    }

    /// Initial battle seed: first 8 digest bytes, little-endian
    #[inline]
    pub fn seed(&self) -> u64 {
        let digest = hash_block(&self.bytes);
        LittleEndian::read_u64(&digest[..8])
    }
}
