//! Tenant home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use kostpanel_core::Announcement;

use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Tenant home template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub is_admin: bool,
    pub room_id: Option<String>,
    pub announcement: Option<Announcement>,
    pub error: Option<String>,
}

/// Pick the announcement to display: the most recent one already in effect.
fn current_announcement(mut announcements: Vec<Announcement>) -> Option<Announcement> {
    let today = chrono::Utc::now().date_naive();
    announcements.retain(|a| a.is_active(today));
    announcements.into_iter().max_by_key(|a| a.effective_date)
}

/// Tenant home: greeting links plus the current announcement.
pub async fn home(
    RequireAuth(session): RequireAuth,
    State(state): State<AppState>,
) -> HomeTemplate {
    let mut error = None;
    let announcement = match session.bearer() {
        Some(token) => match state.backend().list_announcements(token).await {
            Ok(list) => current_announcement(list),
            Err(err) => {
                error = Some(err.alert_text());
                None
            }
        },
        None => None,
    };

    HomeTemplate {
        is_admin: session.snapshot.is_admin,
        room_id: session.snapshot.room().map(str::to_owned),
        announcement,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kostpanel_core::AnnouncementId;

    fn announcement(id: i64, date: &str) -> Announcement {
        Announcement {
            id: AnnouncementId::new(id),
            title: format!("Pengumuman {id}"),
            body: String::new(),
            effective_date: date.parse().expect("date"),
        }
    }

    #[test]
    fn picks_the_latest_active_announcement() {
        let picked = current_announcement(vec![
            announcement(1, "2020-01-01"),
            announcement(2, "2020-06-01"),
            announcement(3, "2999-01-01"),
        ]);
        assert_eq!(picked.map(|a| a.id), Some(AnnouncementId::new(2)));
    }

    #[test]
    fn no_active_announcement_means_none() {
        assert_eq!(current_announcement(vec![announcement(1, "2999-01-01")]), None);
        assert_eq!(current_announcement(Vec::new()), None);
    }
}
