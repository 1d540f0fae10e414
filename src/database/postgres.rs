use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{NewUser, Profile, ProfileFields, ProfileOwner, Social, User};
use crate::database::store::Store;

const USER_COLUMNS: &str = "id, name, email, password, avatar, created_at";

const PROFILE_COLUMNS: &str = "p.id, p.user_id, p.company, p.website, p.location, p.bio, \
     p.status, p.skills, p.githubusername, p.youtube, p.facebook, p.twitter, p.instagram, \
     p.linkedin, p.created_at";

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn populated_select() -> String {
        format!(
            "SELECT {}, u.name AS owner_name, u.avatar AS owner_avatar \
             FROM profiles p JOIN users u ON u.id = p.user_id",
            PROFILE_COLUMNS
        )
    }
}

fn profile_from_row(row: &PgRow) -> Result<Profile, sqlx::Error> {
    Ok(Profile {
        id: row.try_get("id")?,
        user: row.try_get("user_id")?,
        company: row.try_get("company")?,
        website: row.try_get("website")?,
        location: row.try_get("location")?,
        bio: row.try_get("bio")?,
        status: row.try_get("status")?,
        skills: row.try_get("skills")?,
        githubusername: row.try_get("githubusername")?,
        social: Social {
            youtube: row.try_get("youtube")?,
            facebook: row.try_get("facebook")?,
            twitter: row.try_get("twitter")?,
            instagram: row.try_get("instagram")?,
            linkedin: row.try_get("linkedin")?,
        },
        created_at: row.try_get("created_at")?,
    })
}

fn populated_from_row(row: &PgRow) -> Result<Profile<ProfileOwner>, sqlx::Error> {
    let profile = profile_from_row(row)?;
    let owner = ProfileOwner {
        id: profile.user,
        name: row.try_get("owner_name")?,
        avatar: row.try_get("owner_avatar")?,
    };
    Ok(profile.populate(owner))
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (id, name, email, password, avatar) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.avatar)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_write)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, DatabaseError> {
        let sql = format!("SELECT {} FROM profiles p WHERE p.user_id = $1", PROFILE_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(profile_from_row).transpose()?)
    }

    async fn find_populated_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Profile<ProfileOwner>>, DatabaseError> {
        let sql = format!("{} WHERE p.user_id = $1", Self::populated_select());
        let row = sqlx::query(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(populated_from_row).transpose()?)
    }

    async fn list_populated_profiles(&self) -> Result<Vec<Profile<ProfileOwner>>, DatabaseError> {
        let sql = format!("{} ORDER BY p.created_at, p.id", Self::populated_select());
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let profiles = rows
            .iter()
            .map(populated_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(profiles)
    }

    async fn insert_profile(
        &self,
        user_id: Uuid,
        fields: &ProfileFields,
    ) -> Result<Profile, DatabaseError> {
        let status = fields.status.as_ref().ok_or(DatabaseError::MissingField("status"))?;
        let skills = fields.skills.as_ref().ok_or(DatabaseError::MissingField("skills"))?;

        let sql = format!(
            "INSERT INTO profiles AS p (id, user_id, company, website, location, bio, status, \
             skills, githubusername, youtube, facebook, twitter, instagram, linkedin) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {}",
            PROFILE_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(&fields.company)
            .bind(&fields.website)
            .bind(&fields.location)
            .bind(&fields.bio)
            .bind(status)
            .bind(skills)
            .bind(&fields.githubusername)
            .bind(&fields.social.youtube)
            .bind(&fields.social.facebook)
            .bind(&fields.social.twitter)
            .bind(&fields.social.instagram)
            .bind(&fields.social.linkedin)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_write)?;
        Ok(profile_from_row(&row)?)
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        fields: &ProfileFields,
    ) -> Result<Option<Profile>, DatabaseError> {
        // COALESCE keeps the stored value for every unset field
        let sql = format!(
            "UPDATE profiles AS p SET \
               company = COALESCE($2, p.company), \
               website = COALESCE($3, p.website), \
               location = COALESCE($4, p.location), \
               bio = COALESCE($5, p.bio), \
               status = COALESCE($6, p.status), \
               skills = COALESCE($7, p.skills), \
               githubusername = COALESCE($8, p.githubusername), \
               youtube = COALESCE($9, p.youtube), \
               facebook = COALESCE($10, p.facebook), \
               twitter = COALESCE($11, p.twitter), \
               instagram = COALESCE($12, p.instagram), \
               linkedin = COALESCE($13, p.linkedin) \
             WHERE p.user_id = $1 \
             RETURNING {}",
            PROFILE_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(user_id)
            .bind(&fields.company)
            .bind(&fields.website)
            .bind(&fields.location)
            .bind(&fields.bio)
            .bind(&fields.status)
            .bind(&fields.skills)
            .bind(&fields.githubusername)
            .bind(&fields.social.youtube)
            .bind(&fields.social.facebook)
            .bind(&fields.social.twitter)
            .bind(&fields.social.instagram)
            .bind(&fields.social.linkedin)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(profile_from_row).transpose()?)
    }

    async fn delete_profile(&self, user_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
