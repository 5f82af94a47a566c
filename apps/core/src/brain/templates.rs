//! Canned reply text.

use crate::models::ContentItem;

use super::intent::BuilderSection;
use super::search::SearchHit;
use super::topic::TopicKind;

pub const FALLBACK_REPLIES: &[&str] = &[
    "Hi! I'm your learning assistant. Ask me about cyber scams, software development or AI, or say \"help\" to see what I can do.",
    "I'm not sure I understood that. Try asking me to find a video, open a section, or help with your resume.",
    "Good question! I can search the video library for you. Try \"find phishing videos\" or \"tell me about React\".",
    "I'm here to help you learn. Ask me about a topic, a video, or how your session is going.",
];

pub const HELP_REPLY: &str = "Here's what I can do for you:

- Search the video library: \"find videos about passwords\" or \"tell me about React\"
- Explain a topic and suggest videos: cyber scams, software development, artificial intelligence
- Take you to a page: \"go to the software section\", \"open the resume builder\"
- Help with your resume: experience, skills, education, summary and ATS tips
- Report your progress: \"how am I doing?\"

You can also keep learning notes in the Notes tab.";

pub const BUILDER_GENERAL_REPLY: &str = "I can help you build your resume step by step.

Ask me about any section:
- Work experience: how to describe your roles and achievements
- Skills: which technical and soft skills to list
- Education: degrees, courses and certifications
- Summary: writing a short professional profile
- Optimization: making your resume pass ATS filters

Open the Resume Builder tab to start editing.";

pub fn builder_guidance(section: BuilderSection) -> &'static str {
    match section {
        BuilderSection::Experience => "Adding work experience:

List your roles in reverse chronological order with the job title, company, location and dates.

Under each role write 3 to 5 bullet points that start with an action verb (built, led, reduced, automated) and include a measurable result, for example \"Reduced page load time by 40%\".

Internships, freelance projects and volunteer work count too when you are starting out.",
        BuilderSection::Skills => "Adding skills:

Split your skills into technical skills (languages, frameworks, tools) and soft skills (communication, teamwork, problem solving).

Only list skills you can talk about in an interview, and mirror the wording used in the job description.

Keep the list focused: 8 to 12 strong skills beat a long list of buzzwords.",
        BuilderSection::Education => "Adding education:

Include the degree or certificate, the institution and the graduation year (or expected year).

Add relevant coursework, projects or a strong grade if you have limited work experience.

Online certifications belong here too, especially for software, security and AI roles.",
        BuilderSection::Summary => "Writing your summary:

Keep it to 2 or 3 sentences at the top of your resume: who you are, what you are good at and what you are looking for.

Example: \"Junior web developer with hands-on React and Node.js projects, looking to build accessible products in a collaborative team.\"

Tailor the summary to each job you apply for.",
        BuilderSection::Optimization => "Optimizing your resume:

Use a simple single-column layout with standard headings so applicant tracking systems (ATS) can read it.

Reuse keywords from the job posting, quantify achievements and remove anything older or unrelated.

Keep it to one page if you have less than five years of experience, and export it as a PDF.",
    }
}

pub fn topic_reply(kind: TopicKind, supplementary: &[&str], suggestions: &[&ContentItem]) -> String {
    let mut reply = String::new();
    match kind {
        TopicKind::Security => {
            reply.push_str("Staying safe online matters. Here are some quick safety tips:\n\n");
        }
        TopicKind::Software => {
            reply.push_str("Great choice! Software development is a skill for life. Here's what you can learn:\n\n");
        }
        TopicKind::ArtificialIntelligence => {
            reply.push_str("AI is changing how we work and learn. Here's what you can explore:\n\n");
        }
    }
    for line in supplementary {
        reply.push_str(&format!("- {}\n", line));
    }

    if suggestions.is_empty() {
        reply.push_str("\nNew videos on this topic are on the way.\n");
    } else {
        reply.push_str("\nRecommended videos:\n");
        for (rank, item) in suggestions.iter().enumerate() {
            reply.push_str(&format!("{}. {}\n", rank + 1, item.title));
        }
    }

    reply.push_str(&format!("\nTaking you to the {} section...", kind.label()));
    reply
}

pub fn navigation_reply(label: &str) -> String {
    format!("Sure! Opening the {} page for you now.", label)
}

pub fn search_results_reply(query: &str, hits: &[SearchHit<'_>], listed: usize) -> String {
    let mut reply = format!("SEARCH RESULTS for \"{}\":\n\n", query);
    for (rank, hit) in hits.iter().take(listed).enumerate() {
        let item = hit.item;
        match item.year {
            Some(year) => reply.push_str(&format!("{}. {} ({}, {})\n", rank + 1, item.title, item.category, year)),
            None => reply.push_str(&format!("{}. {} ({})\n", rank + 1, item.title, item.category)),
        }
    }
    reply.push_str(&format!(
        "\nFound {} matching video{}. Pick a suggestion below to start watching.",
        hits.len(),
        if hits.len() == 1 { "" } else { "s" }
    ));
    reply
}

pub fn no_results_reply(query: &str) -> String {
    let subject = if query.is_empty() {
        "that".to_string()
    } else {
        format!("\"{}\"", query)
    };
    format!(
        "I couldn't find any videos matching {}. Try one of these topics instead: {}, {} or {}. You can also ask me to open the Resume Builder.",
        subject,
        TopicKind::Security.label(),
        TopicKind::Software.label(),
        TopicKind::ArtificialIntelligence.label(),
    )
}

pub fn session_summary_reply(visited: usize, minutes: i64, watched: usize) -> String {
    let mut reply = format!(
        "You've visited {} page{} in the last {} minute{}.",
        visited,
        if visited == 1 { "" } else { "s" },
        minutes,
        if minutes == 1 { "" } else { "s" },
    );
    if watched > 0 {
        reply.push_str(&format!(" You've watched {} video{} so far.", watched, if watched == 1 { "" } else { "s" }));
    }
    reply.push_str(" Keep going, every lesson counts!");
    reply
}
