//! AOI CRUD operations.

use super::connection::AoiDb;
use crate::Error;
use crate::geometry::Geometry;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// A stored Area of Interest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aoi {
    pub id: i64,
    pub name: String,
    pub geometry: Geometry,
    pub created_at: String,
}

/// Decode one `(id, name, geometry_json, created_at)` row.
fn decode_row(id: i64, name: String, geometry_json: String, created_at: String) -> Result<Aoi, Error> {
    let geometry = serde_json::from_str(&geometry_json).map_err(|e| Error::InvalidGeometry(e.to_string()))?;
    Ok(Aoi { id, name, geometry, created_at })
}

impl AoiDb {
    /// Persist a new AOI and return the stored record.
    ///
    /// The geometry is stored as its canonical JSON serialization; callers
    /// are expected to have run it through normalization first.
    pub async fn insert_aoi(&self, name: &str, geometry: &Geometry) -> Result<Aoi, Error> {
        if name.is_empty() {
            return Err(Error::InvalidInput("name cannot be empty".into()));
        }

        let name = name.to_string();
        let geometry = geometry.clone();
        let geometry_json =
            serde_json::to_string(&geometry).map_err(|e| Error::InvalidGeometry(e.to_string()))?;
        let created_at = chrono::Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<Aoi, Error> {
                conn.execute(
                    "INSERT INTO aois (name, geometry, created_at) VALUES (?1, ?2, ?3)",
                    params![name, geometry_json, created_at],
                )?;
                let id = conn.last_insert_rowid();
                Ok(Aoi { id, name, geometry, created_at })
            })
            .await
            .map_err(Error::from)
    }

    /// Get an AOI by id.
    ///
    /// Returns None if the id doesn't exist.
    pub async fn get_aoi(&self, id: i64) -> Result<Option<Aoi>, Error> {
        self.conn
            .call(move |conn| -> Result<Option<Aoi>, Error> {
                let result = conn.query_row(
                    "SELECT id, name, geometry, created_at FROM aois WHERE id = ?1",
                    params![id],
                    |row| {
                        Ok((
                            row.get::<_, i64>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, String>(3)?,
                        ))
                    },
                );

                match result {
                    Ok((id, name, geometry_json, created_at)) => {
                        decode_row(id, name, geometry_json, created_at).map(Some)
                    }
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// List all stored AOIs, oldest first.
    pub async fn list_aois(&self) -> Result<Vec<Aoi>, Error> {
        self.conn
            .call(move |conn| -> Result<Vec<Aoi>, Error> {
                let mut stmt =
                    conn.prepare("SELECT id, name, geometry, created_at FROM aois ORDER BY id")?;
                let rows = stmt.query_map([], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                })?;

                let mut aois = Vec::new();
                for row in rows {
                    let (id, name, geometry_json, created_at) = row?;
                    aois.push(decode_row(id, name, geometry_json, created_at)?);
                }
                Ok(aois)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete an AOI by id.
    ///
    /// Returns true if a row was removed.
    pub async fn delete_aoi(&self, id: i64) -> Result<bool, Error> {
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let deleted = conn.execute("DELETE FROM aois WHERE id = ?1", params![id])?;
                Ok(deleted > 0)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Geometry {
        Geometry::Polygon {
            coordinates: vec![vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]],
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = AoiDb::open_in_memory().await.unwrap();
        let stored = db.insert_aoi("harbor", &square()).await.unwrap();
        assert!(stored.id > 0);

        let fetched = db.get_aoi(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "harbor");
        assert_eq!(fetched.geometry, square());
        assert_eq!(fetched.created_at, stored.created_at);
    }

    #[tokio::test]
    async fn test_insert_empty_name_rejected() {
        let db = AoiDb::open_in_memory().await.unwrap();
        let result = db.insert_aoi("", &square()).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let db = AoiDb::open_in_memory().await.unwrap();
        let result = db.get_aoi(999).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_ordered_by_id() {
        let db = AoiDb::open_in_memory().await.unwrap();
        db.insert_aoi("first", &square()).await.unwrap();
        db.insert_aoi("second", &square()).await.unwrap();

        let aois = db.list_aois().await.unwrap();
        assert_eq!(aois.len(), 2);
        assert_eq!(aois[0].name, "first");
        assert_eq!(aois[1].name, "second");
    }

    #[tokio::test]
    async fn test_delete() {
        let db = AoiDb::open_in_memory().await.unwrap();
        let stored = db.insert_aoi("doomed", &square()).await.unwrap();

        assert!(db.delete_aoi(stored.id).await.unwrap());
        assert!(db.get_aoi(stored.id).await.unwrap().is_none());
        assert!(!db.delete_aoi(stored.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_point_geometry_roundtrip() {
        let db = AoiDb::open_in_memory().await.unwrap();
        let point = Geometry::Point { coordinates: (-122.4194, 37.7749) };
        let stored = db.insert_aoi("pin", &point).await.unwrap();

        let fetched = db.get_aoi(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.geometry, point);
    }
}
