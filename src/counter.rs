// Linear count-up for elements carrying a numeric data-target.

use web_sys::{Document, Element};

use crate::config::CounterConfig;
use crate::error::Result;
use crate::frame_loop::{self, Frame};
use crate::utils;

/// Leading integer of `raw`, parsed the way `parseInt(raw)` does without a
/// radix: whitespace, optional sign, then decimal digits, or hex digits after
/// a `0x`/`0X` prefix, up to the first character that isn't one.
pub fn parse_target(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.chars().next() {
        Some('-') => (-1, &trimmed[1..]),
        Some('+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let end = rest
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map(|(i, _)| i)
        .unwrap_or_else(|| rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }
    let value = i64::from_str_radix(digits, radix).unwrap_or(i64::MAX);
    Some(sign * value)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CounterTick {
    /// Still counting, show this value.
    Running(i64),
    /// Finished, show the exact target.
    Done(i64),
}

impl CounterTick {
    pub fn value(self) -> i64 {
        match self {
            CounterTick::Running(v) | CounterTick::Done(v) => v,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Counter {
    target: i64,
    step: f64,
    current: f64,
}

impl Counter {
    pub fn new(target: i64, duration_ms: f64, tick_ms: f64) -> Self {
        Counter {
            target,
            step: target as f64 / (duration_ms / tick_ms),
            current: 0.0,
        }
    }

    pub fn tick(&mut self) -> CounterTick {
        self.current += self.step;
        if self.current < self.target as f64 {
            CounterTick::Running(self.current.floor() as i64)
        } else {
            CounterTick::Done(self.target)
        }
    }
}

fn animate(element: Element, mut counter: Counter) -> Result<()> {
    frame_loop::run(move || {
        let tick = counter.tick();
        element.set_text_content(Some(&tick.value().to_string()));
        match tick {
            CounterTick::Running(_) => Frame::Continue,
            CounterTick::Done(_) => Frame::Stop,
        }
    })
}

/// Starts every counter in the document, returns how many were started.
pub fn start_all(document: &Document, config: &CounterConfig) -> Result<usize> {
    let mut started = 0;
    for element in utils::query_all(document, &config.selector)? {
        let raw = element
            .get_attribute(&config.target_attribute)
            .unwrap_or_default();
        let target = match parse_target(&raw) {
            Some(target) => target,
            None => {
                log::warn!("counter with unreadable target {:?} skipped", raw);
                continue;
            }
        };
        animate(element, Counter::new(target, config.duration_ms, config.tick_ms))?;
        started += 1;
    }
    Ok(started)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_like_parse_int() {
        assert_eq!(parse_target("100"), Some(100));
        assert_eq!(parse_target("  42px"), Some(42));
        assert_eq!(parse_target("+7"), Some(7));
        assert_eq!(parse_target("-15"), Some(-15));
        assert_eq!(parse_target("98%"), Some(98));
        assert_eq!(parse_target("abc"), None);
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("-"), None);
    }

    #[test]
    fn hex_prefix_switches_radix() {
        assert_eq!(parse_target("0x1F"), Some(31));
        assert_eq!(parse_target("-0XfF"), Some(-255));
        assert_eq!(parse_target("0x10g"), Some(16));
        assert_eq!(parse_target("0x"), None);
        assert_eq!(parse_target("010"), Some(10));
    }

    #[test]
    fn reaches_target_exactly_without_overshooting() {
        let mut counter = Counter::new(100, 2000.0, 16.0);
        let mut ticks = 0;
        let last = loop {
            ticks += 1;
            match counter.tick() {
                CounterTick::Running(v) => assert!(v <= 100, "overshot at tick {}: {}", ticks, v),
                CounterTick::Done(v) => break v,
            }
            assert!(ticks < 1000);
        };
        assert_eq!(last, 100);
        // 2000ms / 16ms = 125 steps, float drift may cost one more
        assert!(ticks == 125 || ticks == 126, "took {} ticks", ticks);
    }

    #[test]
    fn running_values_never_decrease() {
        let mut counter = Counter::new(250, 2000.0, 16.0);
        let mut previous = 0;
        while let CounterTick::Running(v) = counter.tick() {
            assert!(v >= previous);
            previous = v;
        }
    }

    #[test]
    fn zero_and_negative_targets_finish_immediately() {
        assert_eq!(Counter::new(0, 2000.0, 16.0).tick(), CounterTick::Done(0));
        assert_eq!(Counter::new(-5, 2000.0, 16.0).tick(), CounterTick::Done(-5));
    }
}
