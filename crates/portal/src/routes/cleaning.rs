//! Tenant cleaning schedule view.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use kostpanel_core::CleaningAssignment;

use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Row of the cleaning schedule table, preformatted for display.
#[derive(Debug, Clone)]
pub struct CleaningRow {
    pub room_number: String,
    pub areas: String,
    pub notes: String,
    pub time: String,
}

impl From<CleaningAssignment> for CleaningRow {
    fn from(assignment: CleaningAssignment) -> Self {
        let areas = if assignment.areas.is_empty() {
            "-".to_owned()
        } else {
            assignment.areas.labels().join(", ")
        };
        Self {
            room_number: assignment.room_number,
            areas,
            notes: assignment.notes,
            time: assignment.time.to_string(),
        }
    }
}

/// Cleaning schedule template.
#[derive(Template, WebTemplate)]
#[template(path = "cleaning.html")]
pub struct CleaningTemplate {
    pub rows: Vec<CleaningRow>,
    pub error: Option<String>,
}

/// Show the cleaning schedule for all rooms.
pub async fn schedule(
    RequireAuth(session): RequireAuth,
    State(state): State<AppState>,
) -> CleaningTemplate {
    let (rows, error) = match session.bearer() {
        Some(token) => match state.backend().list_cleanings(token).await {
            Ok(assignments) => (
                assignments.into_iter().map(CleaningRow::from).collect(),
                None,
            ),
            Err(err) => (Vec::new(), Some(err.alert_text())),
        },
        None => (Vec::new(), None),
    };

    CleaningTemplate { rows, error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kostpanel_core::{CleaningAreas, CleaningTime};

    #[test]
    fn row_joins_area_labels() {
        let row = CleaningRow::from(CleaningAssignment {
            room_number: "A-01".to_owned(),
            areas: CleaningAreas {
                parking: true,
                terrace: false,
                corridor: false,
                garden: true,
            },
            notes: "pakai selang".to_owned(),
            time: CleaningTime::Pagi,
        });
        assert_eq!(row.areas, "Parkiran, Taman");
        assert_eq!(row.time, "Pagi");
    }

    #[test]
    fn row_shows_dash_for_no_areas() {
        let row = CleaningRow::from(CleaningAssignment {
            room_number: "A-02".to_owned(),
            areas: CleaningAreas::default(),
            notes: String::new(),
            time: CleaningTime::Sore,
        });
        assert_eq!(row.areas, "-");
    }
}
