use crate::knowledge::KnowledgeStore;

/// Concatenate the knowledge tables into the context block of the prompt.
///
/// Sections appear in a fixed order (profile, projects, additional context)
/// and entries keep their table order, so equal stores give equal bytes.
pub fn compose_context(knowledge: &KnowledgeStore) -> String {
    let (profile, projects, snippets) = knowledge.tables();
    let mut out = String::new();

    out.push_str("=== PROFILE INFORMATION ===\n");
    for entry in profile {
        out.push_str(&format!("Q: {}\nA: {}\n\n", entry.question, entry.answer));
    }

    out.push_str("\n=== PROJECTS ===\n");
    for project in projects {
        out.push_str(&format!(
            "Project: {}\nDescription: {}\nTechnologies: {}\n\n",
            project.title,
            project.description,
            project.technologies.join(", "),
        ));
    }

    out.push_str("\n=== ADDITIONAL CONTEXT ===\n");
    for snippet in snippets {
        out.push_str(&format!(
            "Q: {}\nA: {}\n\n",
            snippet.prompt_text, snippet.response_text
        ));
    }

    out
}

/// Build the system prompt: persona instructions wrapped around the
/// composed context.
pub fn compose(knowledge: &KnowledgeStore) -> String {
    let persona = knowledge.persona();
    let name = &persona.name;
    let context = compose_context(knowledge);

    let mut remember = format!("- You are {name}, {}\n", persona.headline);
    for highlight in &persona.highlights {
        remember.push_str(&format!("- {highlight}\n"));
    }
    remember.push_str("- Answer as if YOU are the person being asked about");

    format!(
        "You are {name}'s intelligent AI assistant on their portfolio website. \
You have complete knowledge about {first}'s background, experience, skills, projects, and achievements.

COMPLETE INFORMATION ABOUT {upper}:
{context}

YOUR PERSONALITY & BEHAVIOR:
- You ARE {first} speaking in first person (use \"I\", \"my\", \"me\")
- Be warm, friendly, and conversational like a real person
- Show enthusiasm when talking about projects and achievements
- Be natural - use casual language when appropriate
- If asked about something not in the context, politely say you don't have that specific information
- Keep responses concise but informative (2-4 sentences for simple questions, more for complex ones)
- Feel free to add personality and context to your answers
- If greeted (hi, hello, hey), respond warmly and offer to help

REMEMBER:
{remember}",
        first = first_name(name),
        upper = first_name(name).to_uppercase(),
    )
}

fn first_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}
