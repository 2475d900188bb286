//! Price calculation.
//!
//! Prices are integer currency units. The base price is looked up by the exact
//! size pair; unknown sizes are charged as the default size.

use crate::types::{Frame, PosterSize};

/// The size every new poster starts with, and the price fallback.
pub const DEFAULT_SIZE: PosterSize = PosterSize::new(30, 40);

/// Sizes on sale, with their base price.
pub const SIZE_PRICES: [(PosterSize, u32); 4] = [
    (PosterSize::new(21, 30), 2490),
    (PosterSize::new(30, 40), 3490),
    (PosterSize::new(40, 50), 4490),
    (PosterSize::new(50, 70), 5490),
];

/// Base price for an exact `{w, h}` pair, falling back to the default size.
pub fn base_price(size: PosterSize) -> u32 {
    lookup(size)
        .or_else(|| lookup(DEFAULT_SIZE))
        .unwrap_or_default()
}

fn lookup(size: PosterSize) -> Option<u32> {
    SIZE_PRICES
        .iter()
        .find(|(s, _)| *s == size)
        .map(|&(_, price)| price)
}

/// Surcharge for the finishing option.
pub fn frame_price(frame: Frame) -> u32 {
    match frame {
        Frame::None => 0,
        Frame::Frame => 900,
        Frame::Hanger => 500,
    }
}

/// Total price of a poster.
pub fn price(size: PosterSize, frame: Frame) -> u32 {
    base_price(size) + frame_price(frame)
}

/// Display form with grouped thousands: `3\u{a0}490 ₽`.
pub fn format_price(price: u32) -> String {
    let digits = price.to_string();
    let mut out = String::with_capacity(digits.len() + 8);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('\u{a0}');
        }
        out.push(c);
    }
    out.push_str(" ₽");
    out
}

/// Whether `size` is one of the sizes on sale.
pub fn is_listed(size: PosterSize) -> bool {
    lookup(size).is_some()
}
