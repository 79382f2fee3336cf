use std::collections::VecDeque;

use crate::models::GeneratedImage;

/// Generated images, most recent first.
///
/// Unbounded unless built with [`History::bounded`], in which case the oldest
/// entries are dropped once the limit is reached.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<GeneratedImage>,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounded(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: Some(limit.max(1)),
        }
    }

    pub fn push(&mut self, image: GeneratedImage) {
        self.entries.push_front(image);
        if let Some(limit) = self.limit {
            self.entries.truncate(limit);
        }
    }

    pub fn latest(&self) -> Option<&GeneratedImage> {
        self.entries.front()
    }

    pub fn get(&self, id: &str) -> Option<&GeneratedImage> {
        self.entries.iter().find(|image| image.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedImage> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EncodedImage;

    fn image(prompt: &str) -> GeneratedImage {
        GeneratedImage::new(EncodedImage::new("image/png", vec![0]), prompt)
    }

    #[test]
    fn most_recent_first() {
        let mut history = History::new();
        history.push(image("first"));
        history.push(image("second"));

        let prompts: Vec<_> = history.iter().map(|i| i.prompt.as_str()).collect();
        assert_eq!(prompts, ["second", "first"]);
        assert_eq!(history.latest().unwrap().prompt, "second");
    }

    #[test]
    fn unbounded_by_default() {
        let mut history = History::new();
        for n in 0..500 {
            history.push(image(&n.to_string()));
        }
        assert_eq!(history.len(), 500);
        assert!(history.limit().is_none());
    }

    #[test]
    fn bounded_history_drops_oldest() {
        let mut history = History::bounded(2);
        let oldest = image("a");
        let oldest_id = oldest.id.clone();
        history.push(oldest);
        history.push(image("b"));
        history.push(image("c"));

        assert_eq!(history.len(), 2);
        assert!(history.get(&oldest_id).is_none());
        assert_eq!(history.latest().unwrap().prompt, "c");
    }

    #[test]
    fn lookup_by_id() {
        let mut history = History::new();
        let entry = image("x");
        let id = entry.id.clone();
        history.push(entry);
        history.push(image("y"));
        assert_eq!(history.get(&id).unwrap().prompt, "x");
        assert!(history.get("missing").is_none());
    }
}
