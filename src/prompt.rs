//! Prompt text for digest generation

use crate::core::models::Newsletter;

/// System message: the model must answer with a JSON object and nothing else.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert newsletter curator. \
    You respond with valid JSON only: no markdown fences, no commentary, no text \
    before or after the JSON object.";

/// Maximum number of named themes before overflow goes to Miscellaneous.
pub const MAX_THEMES: usize = 5;

pub const INSTRUCTIONS: &str = "\
You will receive a batch of newsletter emails. Produce a digest with exactly two parts:

1. TL;DR: 4 to 6 bullet points covering the most important stories across all \
newsletters. Each bullet is at most 18 words and is paraphrased in your own words, \
never copied from the source.

2. Topics: group the stories into at most 5 named themes (for example \"AI\", \
\"Markets\", \"Policy\"). Each story gets a detailed summary of about 3 sentences \
and names the newsletter it came from. If there are more than 5 themes, collapse \
the remainder into a final theme named \"Miscellaneous\".";

pub const SCHEMA_EXAMPLE: &str = r#"Respond with JSON in exactly this shape:
{
  "tldr": [
    "First key takeaway in 18 words or fewer",
    "Second key takeaway in 18 words or fewer"
  ],
  "topics": [
    {
      "name": "Theme name",
      "items": [
        {
          "headline": "About three sentences summarizing the story in your own words.",
          "source": "Newsletter sender name"
        }
      ]
    }
  ]
}"#;

pub const RULES: &str = "\
Rules:
- Output only the JSON object.
- \"tldr\" must contain between 4 and 6 strings.
- \"topics\" must contain at most 5 themes, with \"Miscellaneous\" last if present.
- Every item must have both \"headline\" and \"source\".
- Merge duplicate stories that appear in several newsletters into one item.
- Skip ads, sponsor blocks, unsubscribe footers and housekeeping notes.";

/// Build the user prompt: instructions, schema, rules, then one block per
/// newsletter in input order. Newsletter content is embedded in full.
#[must_use]
pub fn build_digest_prompt(newsletters: &[Newsletter]) -> String {
    let body_len: usize = newsletters
        .iter()
        .map(|n| n.content.len() + n.subject.len() + n.sender.len() + 64)
        .sum();
    let mut prompt =
        String::with_capacity(INSTRUCTIONS.len() + SCHEMA_EXAMPLE.len() + RULES.len() + body_len);

    prompt.push_str(INSTRUCTIONS);
    prompt.push_str("\n\n");
    prompt.push_str(SCHEMA_EXAMPLE);
    prompt.push_str("\n\n");
    prompt.push_str(RULES);
    prompt.push_str("\n\nNewsletters:\n");

    for (index, newsletter) in newsletters.iter().enumerate() {
        prompt.push_str(&format_newsletter_block(index + 1, newsletter));
    }

    prompt
}

/// One newsletter rendered for the prompt.
#[must_use]
pub fn format_newsletter_block(number: usize, newsletter: &Newsletter) -> String {
    format!(
        "\n--- Newsletter {number} ---\nFrom: {}\nSubject: {}\nContent:\n{}\n",
        newsletter.sender, newsletter.subject, newsletter.content
    )
}
