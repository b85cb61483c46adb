//! Full-screen job card for the infinite feed.

use std::fmt::Write as _;

use super::escape_html;
use crate::domain::Job;

/// Class of the card container.
pub const JOB_CARD_CLASS: &str = "job-card-fullscreen";

/// Render the inner markup of a job card.
///
/// Text fields are escaped; `job.id` is numeric and interpolated directly.
/// The save, apply and skip buttons carry `data-action` attributes so the
/// controller can bind them when the card is inserted.
#[must_use]
pub fn job_card_markup(job: &Job) -> String {
    let id = job.id;
    let title = escape_html(&job.title);
    let company = escape_html(&job.company);
    let description = escape_html(&job.description);

    let mut skills = String::new();
    for skill in &job.skills {
        let _ = write!(skills, r#"<span class="skill-tag">{}</span>"#, escape_html(skill));
    }

    format!(
        r#"
        <div class="max-w-2xl w-full bg-white dark:bg-gray-800 rounded-2xl shadow-2xl p-8" data-job-id="{id}">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-3xl font-bold text-gray-800 dark:text-white">{title}</h2>
                <button data-action="save" class="text-blue-600 hover:text-blue-700">
                    <i class="fas fa-bookmark text-2xl"></i>
                </button>
            </div>
            <p class="text-xl text-gray-600 dark:text-gray-400 mb-4">{company}</p>
            <p class="text-gray-700 dark:text-gray-300 mb-6">{description}</p>
            <div class="flex flex-wrap gap-2 mb-6">
                {skills}
            </div>
            <div class="flex gap-4">
                <button data-action="apply" class="flex-1 bg-blue-600 text-white py-3 rounded-lg hover:bg-blue-700 transition">
                    Apply Now
                </button>
                <button data-action="skip" class="flex-1 bg-gray-200 dark:bg-gray-700 text-gray-800 dark:text-white py-3 rounded-lg hover:bg-gray-300 dark:hover:bg-gray-600 transition">
                    Skip
                </button>
            </div>
        </div>
    "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str) -> Job {
        Job {
            id: 42,
            title: title.to_string(),
            company: "Acme & Sons".to_string(),
            description: "Ship \"fast\"".to_string(),
            skills: vec!["Rust".to_string(), "<SQL>".to_string()],
        }
    }

    #[test]
    fn test_title_is_escaped() {
        let html = job_card_markup(&job("<b>X</b>"));
        assert!(html.contains("&lt;b&gt;X&lt;/b&gt;"));
        assert!(!html.contains("<b>X</b>"));
    }

    #[test]
    fn test_fields_and_skills_render() {
        let html = job_card_markup(&job("Engineer"));
        assert!(html.contains("Acme &amp; Sons"));
        assert!(html.contains("Ship &quot;fast&quot;"));
        assert!(html.contains(r#"<span class="skill-tag">Rust</span><span class="skill-tag">&lt;SQL&gt;</span>"#));
        assert!(html.contains(r#"data-job-id="42""#));
        for action in ["save", "apply", "skip"] {
            assert!(html.contains(&format!(r#"data-action="{action}""#)));
        }
    }
}
