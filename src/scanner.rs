// Low-allocation "Label: value [unit]" line scanner over a borrowed buffer.

use std::fmt;

/// Upper bound on the number of lines scanned from one buffer.
///
/// /proc/meminfo has ~55 lines on current kernels. The bound only guards against a
/// runaway source; hitting it is reported, see [`ScanItem::LimitExceeded`].
pub const DEFAULT_LINE_LIMIT: usize = 256;

/// Why a value token was read as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFault {
    /// No digits followed the delimiter.
    Missing,
    /// The digit run does not fit in a u64.
    Overflow,
}

impl fmt::Display for ValueFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueFault::Missing => f.write_str("no digits after delimiter"),
            ValueFault::Overflow => f.write_str("value exceeds 64 bits"),
        }
    }
}

/// One scanned line. `value` is 0 whenever `fault` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair<'a> {
    pub label: &'a [u8],
    pub value: u64,
    pub fault: Option<ValueFault>,
}

impl Pair<'_> {
    pub fn label_lossy(&self) -> String {
        String::from_utf8_lossy(self.label).into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanItem<'a> {
    Pair(Pair<'a>),
    /// More than `limit` lines; yielded once, after which the scan ends.
    LimitExceeded { limit: usize },
}

/// Lazy iterator of [`ScanItem`]s. Holds no state beyond its cursor, so scanning
/// the same buffer twice yields the same items.
pub struct Scanner<'a> {
    buf: &'a [u8],
    pos: usize,
    lines: usize,
    limit: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_line_limit(buf, DEFAULT_LINE_LIMIT)
    }

    pub fn with_line_limit(buf: &'a [u8], limit: usize) -> Self {
        Self {
            buf,
            pos: 0,
            lines: 0,
            limit,
        }
    }

    /// Next line (without its terminator), advancing past the terminator.
    fn next_line(&mut self) -> Option<&'a [u8]> {
        let buf = self.buf;
        if self.pos >= buf.len() {
            return None;
        }
        let rest = &buf[self.pos..];
        let line = match rest.iter().position(|&b| b == b'\n') {
            Some(end) => {
                self.pos += end + 1;
                &rest[..end]
            }
            None => {
                self.pos = buf.len();
                rest
            }
        };
        Some(line)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = ScanItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let at_end = self.pos >= self.buf.len();
            if !at_end && self.lines == self.limit {
                self.pos = self.buf.len();
                return Some(ScanItem::LimitExceeded { limit: self.limit });
            }
            let line = self.next_line()?;
            self.lines += 1;
            match parse_line(line) {
                Some(pair) => return Some(ScanItem::Pair(pair)),
                // No delimiter: skip the line. A final unterminated fragment
                // without one simply ends the scan.
                None => continue,
            }
        }
    }
}

fn parse_line(line: &[u8]) -> Option<Pair<'_>> {
    let colon = line.iter().position(|&b| b == b':')?;
    let label = line[..colon].trim_ascii_end();

    let rest = &line[colon + 1..];
    let start = rest
        .iter()
        .position(|&b| b != b' ' && b != b'\t')
        .unwrap_or(rest.len());
    let digits = rest[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    let (value, fault) = parse_digits(&rest[start..start + digits]);

    Some(Pair {
        label,
        value,
        fault,
    })
}

fn parse_digits(run: &[u8]) -> (u64, Option<ValueFault>) {
    if run.is_empty() {
        return (0, Some(ValueFault::Missing));
    }
    let mut v: u64 = 0;
    for &b in run {
        match v
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
        {
            Some(next) => v = next,
            None => return (0, Some(ValueFault::Overflow)),
        }
    }
    (v, None)
}
