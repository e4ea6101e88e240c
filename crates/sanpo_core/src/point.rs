use lazy_regex::regex_captures;
use thiserror::Error;

use crate::coordinate::Coordinate;

const WKB_POINT_TYPE: u32 = 1;
const EWKB_SRID_FLAG: u32 = 0x2000_0000;
const EWKB_Z_FLAG: u32 = 0x8000_0000;
const EWKB_M_FLAG: u32 = 0x4000_0000;

const MAX_DISPLAYED_INPUT: usize = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PointErrorReason {
    #[error("neither a hex encoded WKB point nor a POINT(lon lat) literal")]
    UnknownEncoding,

    #[error("binary point truncated: {len} bytes, expected {expected}")]
    Truncated { len: usize, expected: usize },

    #[error("unsupported byte order flag {0:#04x}")]
    UnsupportedByteOrder(u8),

    #[error("geometry type {0:#010x} is not a point")]
    NotAPoint(u32),

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("coordinates are not finite")]
    NonFinite,

    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("malformed point {input:?}: {reason}")]
pub struct MalformedPointError {
    pub input: String,
    pub reason: PointErrorReason,
}

impl MalformedPointError {
    fn new(input: &str, reason: PointErrorReason) -> Self {
        let input = if input.chars().count() > MAX_DISPLAYED_INPUT {
            let mut truncated: String = input.chars().take(MAX_DISPLAYED_INPUT).collect();
            truncated.push('…');
            truncated
        } else {
            input.to_string()
        };

        Self { input, reason }
    }
}

/// The two encodings a stored point can arrive in.
#[derive(Debug, Clone, PartialEq)]
pub enum PointEncoding<'a> {
    /// Hex string of a (E)WKB point, as PostGIS returns geometry columns.
    Wkb(Vec<u8>),
    /// `POINT(<lon> <lat>)`, optionally prefixed with `SRID=<n>;`.
    Wkt { lon: &'a str, lat: &'a str },
}

impl<'a> PointEncoding<'a> {
    pub fn sniff(encoded: &'a str) -> Option<Self> {
        let trimmed = encoded.trim();

        if let Some(bytes) = decode_hex(trimmed) {
            return Some(PointEncoding::Wkb(bytes));
        }

        regex_captures!(
            r"^(?:SRID=\d+;\s*)?POINT\s*\(\s*([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)\s+([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)\s*\)$"i,
            trimmed
        )
        .map(|(_, lon, lat)| PointEncoding::Wkt { lon, lat })
    }

    fn decode(&self) -> Result<Coordinate, PointErrorReason> {
        match self {
            PointEncoding::Wkb(bytes) => decode_wkb_point(bytes),
            PointEncoding::Wkt { lon, lat } => Ok(Coordinate::new(
                parse_number(lon)?,
                parse_number(lat)?,
            )),
        }
    }
}

/// Decodes a stored point into a longitude/latitude pair.
pub fn extract(encoded: &str) -> Result<Coordinate, MalformedPointError> {
    let encoding = PointEncoding::sniff(encoded)
        .ok_or_else(|| MalformedPointError::new(encoded, PointErrorReason::UnknownEncoding))?;

    encoding
        .decode()
        .and_then(validate)
        .map_err(|reason| MalformedPointError::new(encoded, reason))
}

fn validate(coordinate: Coordinate) -> Result<Coordinate, PointErrorReason> {
    if !coordinate.is_finite() {
        return Err(PointErrorReason::NonFinite);
    }
    if !coordinate.lon_in_range() {
        return Err(PointErrorReason::LongitudeOutOfRange(coordinate.lon));
    }
    if !coordinate.lat_in_range() {
        return Err(PointErrorReason::LatitudeOutOfRange(coordinate.lat));
    }

    Ok(coordinate)
}

fn parse_number(token: &str) -> Result<f64, PointErrorReason> {
    token
        .parse::<f64>()
        .map_err(|_| PointErrorReason::InvalidNumber(token.to_string()))
}

fn decode_hex(input: &str) -> Option<Vec<u8>> {
    if input.is_empty() || input.len() % 2 != 0 || !input.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return None;
    }

    (0..input.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&input[i..i + 2], 16).ok())
        .collect()
}

/// Layout: byte order (1), type (4), optional SRID (4), x (8), y (8).
fn decode_wkb_point(bytes: &[u8]) -> Result<Coordinate, PointErrorReason> {
    let little_endian = match bytes.first() {
        Some(1) => true,
        Some(0) => false,
        Some(flag) => return Err(PointErrorReason::UnsupportedByteOrder(*flag)),
        None => {
            return Err(PointErrorReason::Truncated {
                len: 0,
                expected: 21,
            });
        }
    };

    let type_tag = read_u32(bytes, 1, little_endian)?;
    let has_srid = type_tag & EWKB_SRID_FLAG != 0;
    if type_tag & !(EWKB_SRID_FLAG | EWKB_Z_FLAG | EWKB_M_FLAG) != WKB_POINT_TYPE {
        return Err(PointErrorReason::NotAPoint(type_tag));
    }

    let x_offset = if has_srid { 9 } else { 5 };
    let lon = read_f64(bytes, x_offset, little_endian)?;
    let lat = read_f64(bytes, x_offset + 8, little_endian)?;

    Ok(Coordinate::new(lon, lat))
}

fn read_u32(bytes: &[u8], offset: usize, little_endian: bool) -> Result<u32, PointErrorReason> {
    let raw: [u8; 4] = read_array(bytes, offset)?;
    Ok(if little_endian {
        u32::from_le_bytes(raw)
    } else {
        u32::from_be_bytes(raw)
    })
}

fn read_f64(bytes: &[u8], offset: usize, little_endian: bool) -> Result<f64, PointErrorReason> {
    let raw: [u8; 8] = read_array(bytes, offset)?;
    Ok(if little_endian {
        f64::from_le_bytes(raw)
    } else {
        f64::from_be_bytes(raw)
    })
}

fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> Result<[u8; N], PointErrorReason> {
    bytes
        .get(offset..offset + N)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(PointErrorReason::Truncated {
            len: bytes.len(),
            expected: offset + N,
        })
}

#[cfg(test)]
fn encode_ewkb_hex(lon: f64, lat: f64, srid: Option<u32>) -> String {
    let mut bytes = vec![1u8];
    match srid {
        Some(srid) => {
            bytes.extend_from_slice(&(WKB_POINT_TYPE | EWKB_SRID_FLAG).to_le_bytes());
            bytes.extend_from_slice(&srid.to_le_bytes());
        }
        None => bytes.extend_from_slice(&WKB_POINT_TYPE.to_le_bytes()),
    }
    bytes.extend_from_slice(&lon.to_le_bytes());
    bytes.extend_from_slice(&lat.to_le_bytes());

    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
