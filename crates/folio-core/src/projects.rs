/// Metadata shown in the project modal.
#[derive(Clone, Copy, Debug)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub desc: &'static str,
    pub tags: &'static [&'static str],
    pub details_html: &'static str,
}

pub const PROJECTS: &[Project] = &[
    Project {
        id: "devpal",
        title: "DevPal - AI Chat Assistant",
        desc: "Built a full-stack AI chatbot using FastAPI and React. Integrated Ollama (LLaMA2) for conversational intelligence. Implemented real-time messaging, retry-based error handling, and responsive UI animations for a ChatGPT-like experience.",
        tags: &["FastAPI", "React", "Ollama", "LLaMA2", "WebSockets", "TailwindCSS"],
        details_html: "<p>Impact:</p><ul><li>Secure, local inference</li><li>Real-time responsiveness</li></ul>",
    },
    Project {
        id: "inventory",
        title: "Inventory Tracking Application",
        desc: "Developed a real-time inventory system with stock monitoring, alerts, and usage reporting. Used AI prompting and zero-code tools to improve system accuracy and responsiveness.",
        tags: &["No-Code", "AI Prompting", "Real-time DB"],
        details_html: "<p>Timeline:</p><p>May 2025 – Jun 2025</p>",
    },
    Project {
        id: "habit",
        title: "Habit Tracking Application",
        desc: "Designed and delivered a user-centric habit tracking app using optimized AI prompts and no-code tools.",
        tags: &["No-Code", "AI Design", "UX/UI"],
        details_html: "<p>Timeline:</p><p>Jul 2025 – Aug 2025</p>",
    },
];

pub fn find(id: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|p| p.id == id)
}

/// Tag chips for the modal.
pub fn tags_html(project: &Project) -> String {
    project
        .tags
        .iter()
        .map(|t| format!("<span class=\"tag\">{}</span>", t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        assert_eq!(find("habit").map(|p| p.tags.len()), Some(3));
        assert!(find("nope").is_none());
    }

    #[test]
    fn tags_render_as_spans() {
        let html = tags_html(find("inventory").unwrap());
        assert_eq!(html.matches("<span class=\"tag\">").count(), 3);
    }
}
