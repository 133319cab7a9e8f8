use crate::error::{AppError, Result};
use crate::model::{parse_date, PictureQuery, PictureResponse};
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::Json;
use tracing::warn;

pub async fn get_picture_handler(
    State(state): State<AppState>,
    Query(query): Query<PictureQuery>,
) -> Result<Json<PictureResponse>> {
    let raw = query
        .date
        .ok_or_else(|| AppError::InvalidDate("missing date parameter".to_string()))?;
    let date = parse_date(&raw)?;

    let retrieval = state.archive().picture_by_date(date).await?;
    if let Some(error) = &retrieval.write_error {
        warn!(%date, %error, "serving picture that could not be archived");
    }

    Ok(Json(retrieval.into_picture().into()))
}

pub async fn list_pictures_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<PictureResponse>>> {
    let pictures = state.archive().pictures().await?;
    Ok(Json(pictures.into_iter().map(Into::into).collect()))
}
