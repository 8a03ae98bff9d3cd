//! School service coordinating validation, image storage and database rows.

use schooldir_common::validation::Validator;
use schooldir_common::{NewSchool, Result, School, SchoolFilter, SchoolSubmission};
use schooldir_db::pool::{get_conn, DbPool};
use schooldir_db::queries::schools;
use schooldir_db::schema;

use crate::images::ImageStore;

/// High-level record service. Cheap to share behind an `Arc`.
pub struct SchoolService {
    pool: DbPool,
    images: ImageStore,
    validator: Validator,
}

impl SchoolService {
    /// Create a new `SchoolService`.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `images` - Where uploaded images are written
    /// * `validator` - Field checks applied to every submission
    pub fn new(pool: DbPool, images: ImageStore, validator: Validator) -> Self {
        Self {
            pool,
            images,
            validator,
        }
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Register a school.
    ///
    /// Validation runs before any I/O, so a rejected submission leaves both
    /// the image directory and the table untouched. The image is written
    /// first and the row inserted only once the write succeeded. If the insert
    /// then fails the image file is left behind unreferenced.
    pub async fn create(&self, submission: SchoolSubmission) -> Result<School> {
        let valid = self.validator.validate(submission)?;

        let stored = self
            .images
            .store(&valid.image.file_name, &valid.image.data)
            .await?;

        let new_school = NewSchool {
            name: valid.name,
            address: valid.address,
            city: valid.city,
            state: valid.state,
            contact: valid.contact,
            email_id: valid.email_id,
            image: stored.public_path,
        };

        let inserted =
            get_conn(&self.pool).and_then(|conn| schools::insert_school(&conn, &new_school));

        match inserted {
            Ok(school) => {
                tracing::info!(
                    id = school.id,
                    name = %school.name,
                    city = %school.city,
                    "Registered school"
                );
                Ok(school)
            }
            Err(e) => {
                tracing::warn!(
                    orphaned_image = %self.images.path_for(&stored.file_name).display(),
                    "Insert failed after image write; image left unreferenced"
                );
                Err(e)
            }
        }
    }

    /// List schools matching `filter`, newest first.
    pub fn list(&self, filter: &SchoolFilter) -> Result<Vec<School>> {
        let conn = get_conn(&self.pool)?;
        let schools = schools::list_schools(&conn, filter)?;
        tracing::debug!(?filter, count = schools.len(), "Listed schools");
        Ok(schools)
    }

    /// Create the schools table if it does not exist.
    pub fn bootstrap(&self) -> Result<()> {
        let conn = get_conn(&self.pool)?;
        schema::bootstrap(&conn)
    }
}
