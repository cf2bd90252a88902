use crate::data::{
    LoadError, LoadOptions, LoadStats, Loaded, RowError, Transaction, TxNo, COLUMNS,
};
use log::{debug, info, warn};
use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Opens `path` and loads it with `read_transactions`. Failing to open the file is
/// the only way this can fail on well-behaved storage; bad lines are just counted.
pub(crate) fn load_transactions_from_path(
    path: &Path,
    opts: LoadOptions,
) -> Result<Loaded, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;
    read_transactions(BufReader::new(file), opts)
}

/// Line oriented importer for the bakery CSV. We don't go through `csv::Reader`
/// here because every physical line must end up in exactly one counter (blank
/// lines included), and a bad line must be skipped rather than stop the reader.
pub(crate) fn read_transactions<R: BufRead>(
    mut reader: R,
    opts: LoadOptions,
) -> Result<Loaded, LoadError> {
    let mut rows = Vec::new();
    let mut stats = LoadStats::default();
    let mut seen: HashSet<Transaction> = HashSet::new();
    let mut header_checked = false;
    let mut lineno = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| LoadError::Read {
                line: lineno,
                source,
            })?;
        if n == 0 {
            break;
        }
        lineno += 1;
        let raw = trim_bytes(&buf);

        if raw.is_empty() {
            stats.skipped_blank += 1;
            continue;
        }
        if opts.drop_header && !header_checked {
            header_checked = true;
            if looks_like_header(raw) {
                debug!("line {lineno}: header skipped");
                stats.header_skipped = true;
                continue;
            }
        }

        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(_) => {
                warn!("line {lineno}: {}", RowError::InvalidUtf8);
                stats.skipped_bad += 1;
                continue;
            }
        };
        let result = parse_line(line).and_then(|tx| {
            if opts.dedupe_rows && !seen.insert(tx.clone()) {
                Err(RowError::Duplicate)
            } else {
                Ok(tx)
            }
        });
        match result {
            Ok(tx) => {
                rows.push(tx);
                stats.ok += 1;
            }
            Err(e) if e.is_duplicate() => {
                warn!("line {lineno}: {e}: {line}");
                stats.skipped_dup += 1;
            }
            Err(e) => {
                warn!("line {lineno}: {e}: {line}");
                stats.skipped_bad += 1;
            }
        }
    }

    info!(
        "{} lines read: {} rows loaded, {} blank, {} malformed, {} duplicate skipped",
        stats.lines(),
        stats.ok,
        stats.skipped_blank,
        stats.skipped_bad,
        stats.skipped_dup
    );
    Ok(Loaded { rows, stats })
}

/// Only ASCII whitespace (vertical tab included) is trimmed, so a non-breaking
/// space is content.
fn is_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

fn trim_bytes(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if !is_space(char::from(*first)) {
            break;
        }
        bytes = rest;
    }
    while let [rest @ .., last] = bytes {
        if !is_space(char::from(*last)) {
            break;
        }
        bytes = rest;
    }
    bytes
}

/// Header detection is a loose heuristic: any line containing `transactionno`,
/// `items` and `datetime` (ASCII case-insensitive, any order) counts as a header.
/// Works on raw bytes so a header is recognized even before the line is decoded.
pub(crate) fn looks_like_header(line: &[u8]) -> bool {
    let low = line.to_ascii_lowercase();
    ["transactionno", "items", "datetime"].iter().all(|needle| {
        low.windows(needle.len())
            .any(|window| window == needle.as_bytes())
    })
}

/// Splits on commas, except inside double quotes. Quotes only toggle the state and
/// are dropped; there is no escaping (`""` just toggles twice).
pub(crate) fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(cur.trim_matches(is_space).to_owned());
                cur.clear();
            }
            _ => cur.push(c),
        }
    }
    fields.push(cur.trim_matches(is_space).to_owned());
    fields
}

/// Parses one non-blank, non-header line into a `Transaction`.
pub(crate) fn parse_line(line: &str) -> Result<Transaction, RowError> {
    let mut cols = split_fields(line);
    if cols.len() < COLUMNS {
        return Err(RowError::TooFewColumns(cols.len()));
    }
    cols.truncate(COLUMNS);
    let transaction_no: TxNo = cols[0]
        .parse()
        .map_err(|_| RowError::InvalidTransactionNo(cols[0].clone()))?;
    if cols[1].is_empty() {
        return Err(RowError::EmptyItems);
    }
    let mut cols = cols.into_iter().skip(1);
    let mut next = || cols.next().unwrap_or_default();
    Ok(Transaction {
        transaction_no,
        items: next(),
        datetime: next(),
        daypart: next(),
        daytype: next(),
    })
}
