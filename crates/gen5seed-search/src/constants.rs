//! Seed search related constants
//!
//! Note: SHA-1 round constants are defined in domain/sha1.rs due to their independence.

// =============================================================================
// Message parameters
// =============================================================================

/// Nazo values for Black (message words 0-4)
pub const NAZO_BLACK: [u32; 5] = [0x02FE3620, 0x00000000, 0x02269BE0, 0x02269D74, 0x02269D74];

/// Nazo values for White (message words 0-4)
pub const NAZO_WHITE: [u32; 5] = [0x02FE3620, 0x00000000, 0x02269C00, 0x02269D94, 0x02269D94];

/// Fixed message tail (words 10-15, raw bytes)
///
/// Microphone, touch screen and keypad assume no input. The last 12 bytes are
/// the SHA-1 padding and the 416-bit message length.
pub const MESSAGE_TAIL: [u8; 24] = [
    0x00, 0x00, 0x00, 0x00, // microphone
    0x00, 0x06, 0x00, 0x00, // touch screen, released
    0xFF, 0x2F, 0x00, 0x00, // keypad, no keys pressed
    0x80, 0x00, 0x00, 0x00, // padding
    0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x01, 0xA0, // length = 52 bytes
];

/// Message size in bytes (one SHA-1 block)
pub const MESSAGE_SIZE: usize = 64;

/// Digest size in bytes
pub const DIGEST_SIZE: usize = 20;

/// GxStat value with no touch-screen input
pub const GX_STAT: u32 = 0x8600_0000;

/// PM flag set on the BCD hour byte when hour >= 12
pub const HOUR_PM_FLAG: u8 = 0x40;

/// First year representable by the DS clock
pub const BASE_YEAR: u16 = 2000;

/// Last year representable by the DS clock
pub const LAST_YEAR: u16 = 2099;

// =============================================================================
// Hardware timing
// =============================================================================

/// CPU cycles per VFrame
pub const CYCLES_PER_VFRAME: u64 = 560_190;

/// CPU cycles per Timer0 increment
pub const CYCLES_PER_TIMER0: u64 = 64;

/// CPU cycles per Timer0 overflow (one TickCount)
pub const CYCLES_PER_TICK: u64 = 4_194_304;

/// CPU cycles per RTC second
pub const CYCLES_PER_SECOND: u64 = 33_513_982;

/// Timer0 increments per VFrame, rounded up (8,753)
pub const TIMER0_PER_VFRAME: u32 = (CYCLES_PER_VFRAME / CYCLES_PER_TIMER0) as u32 + 1;

/// Number of Timer0 values in the predicted window (35,013)
pub const TIMER0_WINDOW: u32 = TIMER0_PER_VFRAME * 4 + 1;

/// Number of Timer0 values in the full domain
pub const TIMER0_FULL: u32 = 1 << 16;

/// Number of seconds offsets tried per candidate
pub const SECOND_OFFSETS: i64 = 3;

/// Highest VCount value
pub const MAX_VCOUNT: u16 = 262;

// =============================================================================
// Search limits
// =============================================================================

/// Maximum number of candidates kept in memory
///
/// About two VFrames over every VCount with no declared turns.
pub const MAX_CANDIDATES: usize = 165_121_308;

// =============================================================================
// Battle RNG
// =============================================================================

/// LCG multiplier
pub const LCG_MULT: u64 = 0x5D58_8B65_6C07_8965;

/// LCG increment
pub const LCG_ADD: u64 = 0x0026_9EC3;

/// Inverse LCG multiplier
pub const LCG_MULT_INV: u64 = 0xDEDC_EDAE_9638_806D;

/// Inverse LCG increment
pub const LCG_ADD_INV: u64 = 0x9B1A_E6E9_A384_E6F9;

/// Priority effect activation chance (percent)
pub const PRIORITY_THRESHOLD: u32 = 20;

/// Accuracy of the player's status-inflicting move (percent)
pub const PLAYER_ACCURACY: u32 = 55;

/// Accuracy of the enemy's attacking move (percent)
pub const ENEMY_ACCURACY: u32 = 95;

/// Critical hit denominator (crit when roll == 0)
pub const CRIT_DENOMINATOR: u32 = 16;

/// Self-hit chance while confused (percent)
pub const SELF_HIT_THRESHOLD: u32 = 50;

/// Number of possible status durations
pub const STATUS_DURATION_RANGE: u32 = 4;

/// Shortest status duration (turns)
pub const STATUS_DURATION_MIN: u32 = 2;
