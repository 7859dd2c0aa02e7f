//! Admin cleaning view: the static weekly-task template.
//!
//! There is no mutation path for cleaning duties in the admin surface; the
//! screen shows the fixed weekly rotation the kost runs on.

use askama::Template;
use askama_web::WebTemplate;

use crate::middleware::RequireAdmin;

/// One entry of the weekly rotation.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyTask {
    pub day: &'static str,
    pub task: &'static str,
    pub done: bool,
}

/// The fixed weekly rotation.
#[must_use]
pub fn weekly_tasks() -> Vec<WeeklyTask> {
    vec![
        WeeklyTask {
            day: "Senin",
            task: "Sapu dan pel koridor",
            done: true,
        },
        WeeklyTask {
            day: "Selasa",
            task: "Bersihkan teras depan",
            done: true,
        },
        WeeklyTask {
            day: "Rabu",
            task: "Rapikan area parkiran",
            done: true,
        },
        WeeklyTask {
            day: "Kamis",
            task: "Siram taman",
            done: true,
        },
        WeeklyTask {
            day: "Jumat",
            task: "Angkut sampah gabungan",
            done: true,
        },
        WeeklyTask {
            day: "Sabtu",
            task: "Cuci tempat sampah",
            done: false,
        },
        WeeklyTask {
            day: "Minggu",
            task: "Kontrol selokan",
            done: true,
        },
    ]
}

/// Number of rotation entries still pending.
#[must_use]
pub fn pending_count() -> usize {
    weekly_tasks().iter().filter(|task| !task.done).count()
}

/// Weekly-template page.
#[derive(Template, WebTemplate)]
#[template(path = "admin/cleaning.html")]
pub struct AdminCleaningTemplate {
    pub tasks: Vec<WeeklyTask>,
}

/// Show the weekly cleaning template.
pub async fn index(RequireAdmin(_session): RequireAdmin) -> AdminCleaningTemplate {
    AdminCleaningTemplate {
        tasks: weekly_tasks(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_task_is_pending() {
        // The dashboard's pending-cleanings count relies on this.
        assert_eq!(pending_count(), 1);
    }
}
