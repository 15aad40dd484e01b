//! Plain-text rendering of a completed run.

use crate::Report;

const CRITIC_WIDTH: usize = 30;
const MOVIE_WIDTH: usize = 20;

/// The summary block followed by the review table.
pub fn summary(report: &Report) -> String {
  let movie = &report.movie;
  let heavy = "=".repeat(50);

  let mut lines = vec![
    heavy.clone(),
    format!("Elite Critics results for: {}", movie.name),
    format!("Genres: {}", movie.genre_line()),
    heavy,
    format!("1. Tomatometer (critics): {}", percent(movie.critic_score)),
    format!("2. Popcornmeter (audience): {}", percent(movie.audience_score)),
    String::new(),
    "--- Recalculated scores ---".to_string(),
    "3. Critics score I - No Room for Noobies: coming soon".to_string(),
    "4. Critics score II - Hierarchy: coming soon".to_string(),
    String::new(),
  ];
  lines.extend(review_table(report));
  lines.join("\n")
}

fn review_table(report: &Report) -> Vec<String> {
  if report.reviews.is_empty() {
    return vec!["No reviews stored for this movie.".to_string()];
  }

  let rule = "-".repeat(40);
  let mut lines = vec![
    rule.clone(),
    "Reviews:".to_string(),
    row("Critic", "Movie", "Approved"),
    rule.clone(),
  ];
  for review in &report.reviews {
    let approved = if review.approved { "True" } else { "False" };
    lines.push(row(&review.critic_name, &report.title, approved));
  }
  lines.push(rule);
  lines
}

fn row(critic: &str, movie: &str, approved: &str) -> String {
  let critic: String = critic.chars().take(CRITIC_WIDTH).collect();
  format!("{critic:<CRITIC_WIDTH$} | {movie:<MOVIE_WIDTH$} | {approved}")
}

fn percent(score: Option<u8>) -> String {
  score.map_or_else(|| "N/A".to_string(), |s| format!("{s}%"))
}
