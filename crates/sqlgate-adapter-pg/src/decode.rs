//! Postgres row decoding into [`ResultRow`]s.
//!
//! Every column type the gateway returns is named here. A type without a
//! decoder fails the whole query rather than silently turning into `null`.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlgate_core::{ResultRow, ScalarValue};
use sqlx::error::BoxDynError;
use sqlx::postgres::types::{PgInterval, PgMoney, PgTimeTz};
use sqlx::postgres::{PgRow, PgValueFormat, PgValueRef, Postgres};
use sqlx::types::ipnetwork::IpNetwork;
use sqlx::types::{BigDecimal, Decimal, Uuid};
use sqlx::{Column, Decode, Row, Type, TypeInfo, ValueRef};

/// Decode a row, keeping the engine's column order.
pub(crate) fn decode_row(row: &PgRow) -> Result<ResultRow, sqlx::Error> {
    let mut out = ResultRow::with_capacity(row.len());
    for column in row.columns() {
        let value = decode_cell(row, column.ordinal(), column.type_info().name())?;
        out.push(column.name(), value);
    }
    Ok(out)
}

fn decode_cell(row: &PgRow, index: usize, type_name: &str) -> Result<ScalarValue, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(ScalarValue::Null);
    }

    let value: ScalarValue = match type_name {
        "BOOL" => row.try_get::<bool, _>(index)?.into(),
        "INT2" => row.try_get::<i16, _>(index)?.into(),
        "INT4" => row.try_get::<i32, _>(index)?.into(),
        "INT8" => row.try_get::<i64, _>(index)?.into(),
        "FLOAT4" => row.try_get::<f32, _>(index)?.into(),
        "FLOAT8" => row.try_get::<f64, _>(index)?.into(),
        "NUMERIC" => ScalarValue::Text(numeric(row, index)?),
        "MONEY" => ScalarValue::Text(format_money(row.try_get::<PgMoney, _>(index)?)),
        // sqlx reports `bpchar` as CHAR; the single-byte `"char"` keeps its quotes.
        "TEXT" | "VARCHAR" | "CHAR" | "NAME" => row.try_get::<String, _>(index)?.into(),
        "\"CHAR\"" => ScalarValue::Text(char::from(row.try_get::<i8, _>(index)? as u8).into()),
        "DATE" => row.try_get::<NaiveDate, _>(index)?.into(),
        "TIME" => row.try_get::<NaiveTime, _>(index)?.into(),
        "TIMETZ" => ScalarValue::Text(format_timetz(
            &row.try_get::<PgTimeTz<NaiveTime, FixedOffset>, _>(index)?,
        )),
        "TIMESTAMP" => row.try_get::<NaiveDateTime, _>(index)?.into(),
        "TIMESTAMPTZ" => row.try_get::<DateTime<Utc>, _>(index)?.into(),
        "INTERVAL" => ScalarValue::Text(format_interval(&row.try_get::<PgInterval, _>(index)?)),
        "UUID" => ScalarValue::Text(row.try_get::<Uuid, _>(index)?.to_string()),
        "INET" => ScalarValue::Text(format_inet(row.try_get::<IpNetwork, _>(index)?)),
        "CIDR" => ScalarValue::Text(row.try_get::<IpNetwork, _>(index)?.to_string()),
        "JSON" | "JSONB" => row.try_get::<serde_json::Value, _>(index)?.into(),
        "BOOL[]" => array::<bool, _>(row, index, ScalarValue::from)?,
        "INT2[]" => array::<i16, _>(row, index, ScalarValue::from)?,
        "INT4[]" => array::<i32, _>(row, index, ScalarValue::from)?,
        "INT8[]" => array::<i64, _>(row, index, ScalarValue::from)?,
        "FLOAT4[]" => array::<f32, _>(row, index, ScalarValue::from)?,
        "FLOAT8[]" => array::<f64, _>(row, index, ScalarValue::from)?,
        "NUMERIC[]" => array::<Decimal, _>(row, index, |d| ScalarValue::Text(d.to_string()))?,
        "TEXT[]" | "VARCHAR[]" | "CHAR[]" | "NAME[]" => {
            array::<String, _>(row, index, ScalarValue::from)?
        }
        "DATE[]" => array::<NaiveDate, _>(row, index, ScalarValue::from)?,
        "TIMESTAMP[]" => array::<NaiveDateTime, _>(row, index, ScalarValue::from)?,
        "TIMESTAMPTZ[]" => array::<DateTime<Utc>, _>(row, index, ScalarValue::from)?,
        "UUID[]" => array::<Uuid, _>(row, index, |u| ScalarValue::Text(u.to_string()))?,
        "JSON[]" | "JSONB[]" => array::<serde_json::Value, _>(row, index, ScalarValue::from)?,
        other => {
            return Err(column_error(index, format!("unsupported column type {other}")));
        }
    };
    Ok(value)
}

fn column_error(index: usize, source: impl Into<BoxDynError>) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: source.into(),
    }
}

/// One-dimensional arrays become JSON arrays; `NULL` elements stay `null`.
fn array<T, F>(row: &PgRow, index: usize, convert: F) -> Result<ScalarValue, sqlx::Error>
where
    Vec<Option<T>>: for<'r> Decode<'r, Postgres> + Type<Postgres>,
    F: Fn(T) -> ScalarValue,
{
    let items: Vec<ScalarValue> = row
        .try_get::<Vec<Option<T>>, _>(index)?
        .into_iter()
        .map(|item| item.map(&convert).unwrap_or(ScalarValue::Null))
        .collect();
    let json = serde_json::to_value(&items).map_err(|e| column_error(index, e))?;
    Ok(ScalarValue::Json(json))
}

/// Exact decimals as text, keeping the column's scale (`18.00` stays `18.00`).
fn numeric(row: &PgRow, index: usize) -> Result<String, sqlx::Error> {
    if let Some(special) = numeric_special(&row.try_get_raw(index)?) {
        return Ok(special.to_string());
    }
    match row.try_get::<Decimal, _>(index) {
        Ok(decimal) => Ok(decimal.to_string()),
        // Beyond 28 significant digits.
        Err(_) => Ok(row.try_get::<BigDecimal, _>(index)?.to_plain_string()),
    }
}

/// `NaN` and the infinities are flagged in the sign word of the binary header.
fn numeric_special(raw: &PgValueRef<'_>) -> Option<&'static str> {
    if raw.format() != PgValueFormat::Binary {
        return None;
    }
    let bytes = raw.as_bytes().ok()?;
    let sign = u16::from_be_bytes([*bytes.get(4)?, *bytes.get(5)?]);
    match sign {
        0xC000 => Some("NaN"),
        0xD000 => Some("Infinity"),
        0xF000 => Some("-Infinity"),
        _ => None,
    }
}

/// Plain amount with two decimals, without the locale's currency symbol.
fn format_money(money: PgMoney) -> String {
    let cents = money.0;
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

fn format_timetz(value: &PgTimeTz<NaiveTime, FixedOffset>) -> String {
    let seconds = value.offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let seconds = seconds.unsigned_abs();
    let (hours, minutes, secs) = (seconds / 3600, seconds % 3600 / 60, seconds % 60);
    let mut out = format!("{}{sign}{hours:02}", value.time);
    if minutes != 0 || secs != 0 {
        out.push_str(&format!(":{minutes:02}"));
    }
    if secs != 0 {
        out.push_str(&format!(":{secs:02}"));
    }
    out
}

/// Postgres' default `IntervalStyle` rendering, e.g. `1 year 2 mons 3 days 04:05:06`.
fn format_interval(interval: &PgInterval) -> String {
    fn unit(parts: &mut Vec<String>, amount: i64, name: &str) {
        if amount != 0 {
            let plural = if amount == 1 { "" } else { "s" };
            parts.push(format!("{amount} {name}{plural}"));
        }
    }

    let mut parts = Vec::new();
    unit(&mut parts, i64::from(interval.months / 12), "year");
    unit(&mut parts, i64::from(interval.months % 12), "mon");
    unit(&mut parts, i64::from(interval.days), "day");

    let micros = interval.microseconds;
    if micros != 0 || parts.is_empty() {
        let sign = if micros < 0 { "-" } else { "" };
        let micros = micros.unsigned_abs();
        let total_seconds = micros / 1_000_000;
        let mut clock = format!(
            "{sign}{:02}:{:02}:{:02}",
            total_seconds / 3600,
            total_seconds % 3600 / 60,
            total_seconds % 60
        );
        let fraction = micros % 1_000_000;
        if fraction != 0 {
            let digits = format!("{fraction:06}");
            clock.push('.');
            clock.push_str(digits.trim_end_matches('0'));
        }
        parts.push(clock);
    }
    parts.join(" ")
}

/// Host addresses print without their full-length prefix, as `inet` output does.
fn format_inet(network: IpNetwork) -> String {
    let full = if network.is_ipv4() { 32 } else { 128 };
    if network.prefix() == full {
        network.ip().to_string()
    } else {
        network.to_string()
    }
}
