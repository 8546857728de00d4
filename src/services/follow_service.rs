use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::follow_repo;
use crate::error::{is_unique_violation, AppError};

#[derive(Debug, Deserialize, Default)]
pub struct FollowRequest {
    pub follower_id: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum FollowOutcome {
    Followed,
    AlreadyFollowing,
}

#[derive(Debug, PartialEq, Eq)]
pub enum UnfollowOutcome {
    Unfollowed,
    NotFollowing,
}

pub async fn follow_user(
    pool: &SqlitePool,
    followee_id: &str,
    req: FollowRequest,
) -> Result<FollowOutcome, AppError> {
    let follower_id = req
        .follower_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("follower_id is required".into()))?;

    if follower_id == followee_id {
        return Err(AppError::Validation("cannot follow self".into()));
    }

    if follow_repo::find_follow(pool, follower_id, followee_id)
        .await?
        .is_some()
    {
        return Ok(FollowOutcome::AlreadyFollowing);
    }

    let id = Uuid::new_v4().to_string();
    let inserted = follow_repo::insert_follow(
        pool,
        follow_repo::NewFollow {
            id: &id,
            follower_id,
            followee_id,
        },
    )
    .await;

    match inserted {
        Ok(_) => Ok(FollowOutcome::Followed),
        // Lost the race against an identical follow; the pair exists, which
        // is all the caller asked for.
        Err(e) if is_unique_violation(&e) => Ok(FollowOutcome::AlreadyFollowing),
        Err(e) => Err(AppError::Store(e)),
    }
}

pub async fn unfollow_user(
    pool: &SqlitePool,
    followee_id: &str,
    follower_id: Option<&str>,
) -> Result<UnfollowOutcome, AppError> {
    let follower_id = follower_id
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("follower_id is required".into()))?;

    let deleted = follow_repo::delete_follow(pool, follower_id, followee_id).await?;
    if deleted == 0 {
        Ok(UnfollowOutcome::NotFollowing)
    } else {
        Ok(UnfollowOutcome::Unfollowed)
    }
}
