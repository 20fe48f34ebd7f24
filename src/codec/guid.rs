//! Block identifiers for exported configs. They only need to be unique
//! within one export.

use rand::Rng;

pub trait GuidSource {
    /// Next identifier, rendered as `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}`.
    fn next_guid(&mut self) -> String;
}

/// Random version 4 identifiers.
#[derive(Debug, Default)]
pub struct RandomGuids;

impl GuidSource for RandomGuids {
    fn next_guid(&mut self) -> String {
        let mut value: u128 = rand::thread_rng().gen();
        // Version nibble 4, variant bits 10
        value = (value & !(0xFu128 << 76)) | (0x4u128 << 76);
        value = (value & !(0x3u128 << 62)) | (0x2u128 << 62);
        render(value)
    }
}

/// Counting identifiers for reproducible output.
#[derive(Debug, Default)]
pub struct SequentialGuids {
    next: u128,
}

impl SequentialGuids {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GuidSource for SequentialGuids {
    fn next_guid(&mut self) -> String {
        self.next += 1;
        render(self.next)
    }
}

fn render(value: u128) -> String {
    let hex = format!("{:032X}", value);
    format!(
        "{{{}-{}-{}-{}-{}}}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}
