use console::{style, StyledObject};

/// Role a piece of terminal text plays in the report.
#[derive(Debug, Clone, Copy)]
enum Role {
    Brand,
    Heading,
    Label,
    Value,
    Highlight,
    Success,
    Failure,
}

fn styled(text: impl std::fmt::Display, role: Role) -> StyledObject<String> {
    let text = style(text.to_string());
    match role {
        Role::Brand => text.magenta().bold(),
        Role::Heading => text.bright(),
        Role::Label => text.dim(),
        Role::Value => text.bright().yellow(),
        Role::Highlight => text.cyan(),
        Role::Success => text.bright().green(),
        Role::Failure => text.bright().red(),
    }
}

pub fn brand(text: impl std::fmt::Display) -> StyledObject<String> {
    styled(text, Role::Brand)
}

pub fn heading(text: impl std::fmt::Display) -> StyledObject<String> {
    styled(text, Role::Heading)
}

pub fn label(text: impl std::fmt::Display) -> StyledObject<String> {
    styled(text, Role::Label)
}

pub fn value(text: impl std::fmt::Display) -> StyledObject<String> {
    styled(text, Role::Value)
}

pub fn highlight(text: impl std::fmt::Display) -> StyledObject<String> {
    styled(text, Role::Highlight)
}

pub fn success(text: impl std::fmt::Display) -> StyledObject<String> {
    styled(text, Role::Success)
}

pub fn failure(text: impl std::fmt::Display) -> StyledObject<String> {
    styled(text, Role::Failure)
}
