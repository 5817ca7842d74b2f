//! Student roster repository functions, generic over `ConnectionTrait`.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::students;
use crate::error::AppError;

/// One page of the roster plus the overall total.
#[derive(Debug, Clone)]
pub struct StudentPage {
    pub students: Vec<students::Model>,
    pub total: u64,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub grade: Option<i32>,
    pub section: Option<String>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.grade.is_none() && self.section.is_none()
    }
}

/// Fetch one page, ordered by id for stable pagination.
/// `page` is 1-based.
pub async fn list_page<C: ConnectionTrait>(
    conn: &C,
    page: u64,
    per_page: u64,
) -> Result<StudentPage, AppError> {
    let paginator = students::Entity::find()
        .order_by_asc(students::Column::Id)
        .paginate(conn, per_page);

    let total = paginator.num_items().await.map_err(AppError::from)?;
    let students = paginator
        .fetch_page(page.saturating_sub(1))
        .await
        .map_err(AppError::from)?;

    Ok(StudentPage { students, total })
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Option<students::Model>, AppError> {
    students::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(AppError::from)
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    grade: i32,
    section: &str,
) -> Result<students::Model, AppError> {
    let now = OffsetDateTime::now_utc();
    let active = students::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        grade: Set(grade),
        section: Set(section.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    active.insert(conn).await.map_err(AppError::from)
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    student: students::Model,
    patch: StudentPatch,
) -> Result<students::Model, AppError> {
    let mut active: students::ActiveModel = student.into();
    if let Some(name) = patch.name {
        active.name = Set(name);
    }
    if let Some(grade) = patch.grade {
        active.grade = Set(grade);
    }
    if let Some(section) = patch.section {
        active.section = Set(section);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());

    active.update(conn).await.map_err(AppError::from)
}

/// Delete by id; returns whether a row was actually removed.
pub async fn delete<C: ConnectionTrait>(conn: &C, id: i64) -> Result<bool, AppError> {
    let result = students::Entity::delete_by_id(id)
        .exec(conn)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected > 0)
}

pub async fn count<C: ConnectionTrait>(conn: &C) -> Result<u64, AppError> {
    students::Entity::find()
        .count(conn)
        .await
        .map_err(AppError::from)
}
