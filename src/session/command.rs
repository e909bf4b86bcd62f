/// A recognized top-level command token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Update,
    Delete,
    Find,
    List,
    Check,
    Quit,
}

impl Command {
    /// Case-sensitive exact match against the lowercase spellings.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "add" => Some(Self::Add),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            "find" => Some(Self::Find),
            "list" => Some(Self::List),
            "check" => Some(Self::Check),
            "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(Command::parse("add"), Some(Command::Add));
        assert_eq!(Command::parse("update"), Some(Command::Update));
        assert_eq!(Command::parse("delete"), Some(Command::Delete));
        assert_eq!(Command::parse("find"), Some(Command::Find));
        assert_eq!(Command::parse("list"), Some(Command::List));
        assert_eq!(Command::parse("check"), Some(Command::Check));
        assert_eq!(Command::parse("quit"), Some(Command::Quit));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(Command::parse("Add"), None);
        assert_eq!(Command::parse("QUIT"), None);
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("drop"), None);
        assert_eq!(Command::parse("add "), None);
    }
}
