/// Ordered, duplicate-free tag list as edited in the course forms.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagInput {
    tags: Vec<String>,
}

impl TagInput {
    pub fn new(tags: Vec<String>) -> Self {
        let mut input = Self::default();
        for tag in tags {
            input.add(&tag);
        }
        input
    }

    /// Adds the trimmed tag. Returns false for blanks and duplicates.
    pub fn add(&mut self, raw: &str) -> bool {
        let tag = raw.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn into_tags(self) -> Vec<String> {
        self.tags
    }
}
