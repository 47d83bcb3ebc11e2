//! Reading and writing student rows in a 9-field delimited text format.
//!
//! Field order is `name, surname, id, birth year, birth month, birth day, group,
//! score, phone`. Fields are not quoted, so values must not contain the delimiter.
//! Extra trailing fields are ignored on read. Scores are written with two decimals.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use tracing::{info, warn};

use crate::config::{IngestOptions, MalformedPolicy};
use crate::core::{BirthDate, Record};
use crate::error::{Result, RosterError};
use crate::store::RosterStore;

/// Column names of the header line, in field order.
pub const HEADER_FIELDS: [&str; FIELD_COUNT] = [
    "m_name",
    "m_surname",
    "m_email",
    "m_birth_year",
    "m_birth_month",
    "m_birth_day",
    "m_group",
    "m_rating",
    "m_phone_number",
];

/// Minimum number of fields in a data row.
pub const FIELD_COUNT: usize = 9;

/// Parses one data row. `line_no` is only used for error reporting.
pub fn parse_record(line: &str, delimiter: char, line_no: usize) -> Result<Record> {
    let malformed = |reason: String| RosterError::Malformed {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.split(delimiter).collect();
    if fields.len() < FIELD_COUNT {
        return Err(malformed(format!(
            "expected {FIELD_COUNT} fields, found {}",
            fields.len()
        )));
    }

    let year: i32 = parse_field(fields[3], "birth year").map_err(&malformed)?;
    let month: u8 = parse_field(fields[4], "birth month").map_err(&malformed)?;
    let day: u8 = parse_field(fields[5], "birth day").map_err(&malformed)?;
    let score: f64 = parse_field(fields[7], "score").map_err(&malformed)?;
    if !score.is_finite() {
        return Err(malformed(format!("score '{}' is not finite", fields[7].trim())));
    }

    Ok(Record {
        name: fields[0].to_owned(),
        surname: fields[1].to_owned(),
        id: fields[2].to_owned(),
        birth: BirthDate::new(year, month, day),
        group: fields[6].to_owned(),
        score,
        phone: fields[8].to_owned(),
    })
}

fn parse_field<T: FromStr>(raw: &str, what: &str) -> std::result::Result<T, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("{what} '{}' is not a number", raw.trim()))
}

/// Reads every data row from `reader`, in order.
///
/// Blank lines are ignored. Malformed rows are skipped or fatal per
/// [`IngestOptions::malformed`].
pub fn read_records<R: BufRead>(reader: R, options: &IngestOptions) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        if i == 0 && options.has_header {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_record(&line, options.delimiter, line_no) {
            Ok(record) => records.push(record),
            Err(err) if options.malformed == MalformedPolicy::Skip => {
                warn!("skipping row: {err}");
                skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    info!(records = records.len(), skipped, "read delimited rows");
    Ok(records)
}

/// Reads rows from `reader` and inserts them into a new store in row order.
///
/// Later rows replace earlier ones with the same identifier.
pub fn load_store<R: BufRead>(reader: R, options: &IngestOptions) -> Result<RosterStore> {
    RosterStore::from_records(read_records(reader, options)?)
}

pub fn load_path(path: impl AsRef<Path>, options: &IngestOptions) -> Result<RosterStore> {
    let file = File::open(path)?;
    load_store(BufReader::new(file), options)
}

/// Writes the header line and one row per record.
pub fn write_records<'a, W, I>(mut writer: W, records: I, delimiter: char) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut sep = [0u8; 4];
    let sep: &str = delimiter.encode_utf8(&mut sep);

    writeln!(writer, "{}", HEADER_FIELDS.join(sep))?;
    for r in records {
        writeln!(
            writer,
            "{name}{sep}{surname}{sep}{id}{sep}{year}{sep}{month}{sep}{day}{sep}{group}{sep}{score:.2}{sep}{phone}",
            name = r.name,
            surname = r.surname,
            id = r.id,
            year = r.birth.year,
            month = r.birth.month,
            day = r.birth.day,
            group = r.group,
            score = r.score,
            phone = r.phone,
        )?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_path<'a, I>(path: impl AsRef<Path>, records: I, delimiter: char) -> Result<()>
where
    I: IntoIterator<Item = &'a Record>,
{
    let file = File::create(path)?;
    write_records(BufWriter::new(file), records, delimiter)
}
