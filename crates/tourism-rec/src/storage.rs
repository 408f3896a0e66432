//! .trec binary snapshot format for the rating dataset.

use std::io::{Read, Write};
use std::path::Path;

use crate::dataset::Dataset;
use crate::types::{Place, RatingRecord, RecError, RecResult, User};

/// Magic bytes: "TREC"
const TREC_MAGIC: u32 = 0x54524543;

/// Current format version.
const FORMAT_VERSION: u16 = 1;

/// Header size in bytes.
const HEADER_SIZE: usize = 64;

/// Writer for .trec files.
pub struct TrecWriter;

/// Reader for .trec files.
pub struct TrecReader;

impl TrecWriter {
    /// Write a dataset to a file, creating parent directories.
    pub fn write_to_file(dataset: &Dataset, path: &Path) -> RecResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = std::fs::File::create(path)?;
        Self::write_to(dataset, &mut file)
    }

    /// Write a dataset to any writer.
    pub fn write_to<W: Write>(dataset: &Dataset, writer: &mut W) -> RecResult<()> {
        let ratings: Vec<RatingRecord> = dataset.ratings.records().collect();
        let payload = serde_json::to_vec(&SerializedDataset {
            places: dataset.catalog.places(),
            users: &dataset.users,
            ratings: &ratings,
        })
        .map_err(|e| RecError::Storage(format!("Serialization failed: {e}")))?;

        let mut header = [0u8; HEADER_SIZE];
        write_u32(&mut header[0..4], TREC_MAGIC);
        write_u16(&mut header[4..6], FORMAT_VERSION);
        write_u16(&mut header[6..8], 0); // flags
        write_u32(&mut header[8..12], dataset.catalog.len() as u32);
        write_u32(&mut header[12..16], dataset.users.len() as u32);
        write_u64(&mut header[16..24], ratings.len() as u64);
        write_u64(&mut header[24..32], dataset.created_at);
        write_u64(&mut header[32..40], dataset.updated_at);
        write_u64(&mut header[40..48], payload.len() as u64);

        writer.write_all(&header)?;
        writer.write_all(&payload)?;

        Ok(())
    }
}

impl TrecReader {
    /// Read a dataset from a file.
    pub fn read_from_file(path: &Path) -> RecResult<Dataset> {
        let mut file = std::fs::File::open(path)?;
        let dataset = Self::read_from(&mut file)?;
        tracing::info!(
            "Loaded dataset from {}: {} places, {} ratings",
            path.display(),
            dataset.catalog.len(),
            dataset.ratings.len()
        );
        Ok(dataset)
    }

    /// Read and validate a dataset from any reader.
    pub fn read_from<R: Read>(reader: &mut R) -> RecResult<Dataset> {
        let mut header = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header)?;

        let magic = read_u32(&header[0..4]);
        if magic != TREC_MAGIC {
            return Err(RecError::Storage(format!(
                "Invalid magic: expected 0x{TREC_MAGIC:08X}, got 0x{magic:08X}"
            )));
        }

        let version = read_u16(&header[4..6]);
        if version != FORMAT_VERSION {
            return Err(RecError::Storage(format!(
                "Unsupported version: {version}"
            )));
        }

        let place_count = read_u32(&header[8..12]) as usize;
        let user_count = read_u32(&header[12..16]) as usize;
        let rating_count = read_u64(&header[16..24]) as usize;
        let created_at = read_u64(&header[24..32]);
        let updated_at = read_u64(&header[32..40]);
        let payload_len = read_u64(&header[40..48]);

        // The declared length is untrusted; read at most that many bytes.
        let mut payload = Vec::new();
        reader.by_ref().take(payload_len).read_to_end(&mut payload)?;
        if payload.len() as u64 != payload_len {
            return Err(RecError::Storage(format!(
                "Truncated payload: header declares {payload_len} bytes, found {}",
                payload.len()
            )));
        }

        let serialized: DeserializedDataset = serde_json::from_slice(&payload)
            .map_err(|e| RecError::Storage(format!("Deserialization failed: {e}")))?;

        if serialized.places.len() != place_count
            || serialized.users.len() != user_count
            || serialized.ratings.len() != rating_count
        {
            return Err(RecError::Storage(
                "Header counts do not match payload".to_string(),
            ));
        }

        let mut dataset =
            Dataset::from_records(serialized.places, serialized.users, serialized.ratings)
                .map_err(|e| match e {
                    RecError::InvalidRating(_) => RecError::MalformedInput(e.to_string()),
                    other => other,
                })?;
        dataset.created_at = created_at;
        dataset.updated_at = updated_at;
        Ok(dataset)
    }
}

#[derive(serde::Serialize)]
struct SerializedDataset<'a> {
    places: &'a [Place],
    users: &'a [User],
    ratings: &'a [RatingRecord],
}

#[derive(serde::Deserialize)]
struct DeserializedDataset {
    places: Vec<Place>,
    #[serde(default)]
    users: Vec<User>,
    ratings: Vec<RatingRecord>,
}

// Little-endian byte helpers
fn write_u16(buf: &mut [u8], val: u16) {
    buf[..2].copy_from_slice(&val.to_le_bytes());
}
fn write_u32(buf: &mut [u8], val: u32) {
    buf[..4].copy_from_slice(&val.to_le_bytes());
}
fn write_u64(buf: &mut [u8], val: u64) {
    buf[..8].copy_from_slice(&val.to_le_bytes());
}
fn read_u16(buf: &[u8]) -> u16 {
    u16::from_le_bytes([buf[0], buf[1]])
}
fn read_u32(buf: &[u8]) -> u32 {
    u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]])
}
fn read_u64(buf: &[u8]) -> u64 {
    u64::from_le_bytes([buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: u32, name: &str) -> Place {
        Place {
            id,
            name: name.to_string(),
            category: "Taman Hiburan".to_string(),
            city: "Semarang".to_string(),
            price: 15000.0,
            rating: 4.3,
            lat: -7.0,
            lon: 110.4,
            description: "family park".to_string(),
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(
            vec![place(1, "Lawang Sewu"), place(2, "Kota Lama")],
            vec![User {
                id: 1,
                location: Some("Semarang".into()),
                age: Some(30),
            }],
            vec![
                RatingRecord {
                    user_id: 1,
                    place_id: 1,
                    rating: 5,
                },
                RatingRecord {
                    user_id: 2,
                    place_id: 2,
                    rating: 3,
                },
            ],
        )
        .unwrap()
    }

    /// Hand-build a snapshot so invalid payloads can be fed to the reader.
    fn raw_snapshot(payload: serde_json::Value, places: u32, ratings: u64) -> Vec<u8> {
        let payload = serde_json::to_vec(&payload).unwrap();
        let mut header = [0u8; HEADER_SIZE];
        write_u32(&mut header[0..4], TREC_MAGIC);
        write_u16(&mut header[4..6], FORMAT_VERSION);
        write_u32(&mut header[8..12], places);
        write_u64(&mut header[16..24], ratings);
        write_u64(&mut header[40..48], payload.len() as u64);
        let mut buf = header.to_vec();
        buf.extend_from_slice(&payload);
        buf
    }

    #[test]
    fn test_roundtrip() {
        let ds = dataset();
        let mut buf = Vec::new();
        TrecWriter::write_to(&ds, &mut buf).unwrap();

        let loaded = TrecReader::read_from(&mut &buf[..]).unwrap();
        assert_eq!(loaded.catalog.len(), 2);
        assert_eq!(loaded.users, ds.users);
        assert_eq!(loaded.ratings.get(2, 2), Some(3));
        assert_eq!(loaded.created_at, ds.created_at);
    }

    #[test]
    fn test_invalid_magic() {
        let buf = [0u8; HEADER_SIZE + 10];
        let result = TrecReader::read_from(&mut &buf[..]);
        assert!(matches!(result, Err(RecError::Storage(_))));
    }

    #[test]
    fn test_truncated_file() {
        let mut buf = Vec::new();
        TrecWriter::write_to(&dataset(), &mut buf).unwrap();
        buf.truncate(buf.len() - 5);
        assert!(matches!(
            TrecReader::read_from(&mut &buf[..]),
            Err(RecError::Storage(_))
        ));

        // Cut inside the header.
        buf.truncate(HEADER_SIZE - 1);
        assert!(matches!(
            TrecReader::read_from(&mut &buf[..]),
            Err(RecError::Io(_))
        ));
    }

    #[test]
    fn test_oversized_payload_length() {
        let mut buf = raw_snapshot(serde_json::json!({"places": []}), 0, 0);
        write_u64(&mut buf[40..48], u64::MAX / 2);
        match TrecReader::read_from(&mut &buf[..]) {
            Err(RecError::Storage(msg)) => assert!(msg.contains("Truncated payload"), "{msg}"),
            other => panic!("expected storage error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_rejects_out_of_range_rating() {
        let buf = raw_snapshot(
            serde_json::json!({
                "places": [place(1, "Lawang Sewu")],
                "ratings": [{"user_id": 1, "place_id": 1, "rating": 7}],
            }),
            1,
            1,
        );
        assert!(matches!(
            TrecReader::read_from(&mut &buf[..]),
            Err(RecError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_place() {
        let buf = raw_snapshot(
            serde_json::json!({
                "places": [place(1, "Lawang Sewu")],
                "ratings": [{"user_id": 1, "place_id": 9, "rating": 4}],
            }),
            1,
            1,
        );
        assert!(matches!(
            TrecReader::read_from(&mut &buf[..]),
            Err(RecError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("test.trec");

        TrecWriter::write_to_file(&dataset(), &path).unwrap();
        let loaded = TrecReader::read_from_file(&path).unwrap();
        assert_eq!(loaded.ratings.len(), 2);
    }
}
