use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Food,
    Transport,
    Bills,
    Entertainment,
    Other,
}

impl Category {
    /// The fixed category list, in menu and report order.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Bills,
        Category::Entertainment,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Bills => "Bills",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }

    /// Resolves a 1-based menu number such as `"3"` to its category.
    pub fn from_choice(input: &str) -> Option<Category> {
        let input = input.trim();
        if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let number = input.parse::<usize>().ok()?;
        if (1..=Self::ALL.len()).contains(&number) {
            Some(Self::ALL[number - 1])
        } else {
            None
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
