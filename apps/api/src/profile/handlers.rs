use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::deck::{build_deck, Deck};
use crate::errors::AppError;
use crate::profile::completeness::{completeness_percent, is_ready_for_preview};
use crate::profile::models::Profile;
use crate::profile::store::{load_profile, save_profile};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub profile: Profile,
    pub completeness: u32,
    pub ready_for_preview: bool,
}

impl ProfileResponse {
    pub fn new(profile: Profile) -> Self {
        let completeness = completeness_percent(&profile);
        let ready_for_preview = is_ready_for_preview(&profile);
        Self {
            profile,
            completeness,
            ready_for_preview,
        }
    }
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = load_profile(&state.db, params.user_id)
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(ProfileResponse::new(profile)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub user_id: Uuid,
    pub profile: Profile,
}

/// PUT /api/v1/profile — direct user edits arrive as a full document, the
/// same immutable-replace discipline the merge step uses.
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    save_profile(&state.db, req.user_id, &req.profile)
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(ProfileResponse::new(req.profile)))
}

/// GET /api/v1/profile/deck — the data contract the export collaborators
/// consume. Rendering (PPTX bytes, print CSS) happens client-side.
pub async fn handle_get_deck(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Deck>, AppError> {
    let profile = load_profile(&state.db, params.user_id)
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(build_deck(&profile)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::models::{PersonalInfo, Skill};

    #[test]
    fn test_profile_response_recomputes_derived_state() {
        let profile = Profile {
            personal_info: PersonalInfo {
                name: "Jane".into(),
                title: "Engineer".into(),
                summary: "Summary".into(),
                ..PersonalInfo::default()
            },
            skills: vec![Skill {
                name: "Rust".into(),
                level: "Expert".into(),
                category: "Technical".into(),
            }],
            ..Profile::default()
        };

        let response = ProfileResponse::new(profile);
        assert_eq!(response.completeness, 29);
        assert!(response.ready_for_preview);
    }
}
