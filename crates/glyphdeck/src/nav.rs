//! Navigation tree built from slide titles.
//!
//! Titles are split on a category delimiter (`"Intro: Goals"` becomes
//! `Intro` > `Goals`) and merged into an ordered tree. A node is bound to
//! the first slide whose full title path ends at it; later slides with the
//! same path stay unbound and resolve to that node through the navigator's
//! lookback. Bound nodes are the navigation markers.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: String,
    pub depth: usize,
    /// Slide this entry activates. `None` for pure category labels.
    pub slide: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavTree {
    entries: Vec<NavEntry>,
}

#[derive(Debug, Default)]
struct Node {
    label: String,
    slide: Option<usize>,
    children: Vec<Node>,
}

impl Node {
    fn child(&mut self, label: &str) -> &mut Node {
        let pos = match self.children.iter().position(|c| c.label == label) {
            Some(pos) => pos,
            None => {
                self.children.push(Node {
                    label: label.to_string(),
                    ..Node::default()
                });
                self.children.len() - 1
            }
        };
        &mut self.children[pos]
    }

    fn flatten(&self, depth: usize, out: &mut Vec<NavEntry>) {
        for child in &self.children {
            out.push(NavEntry {
                label: child.label.clone(),
                depth,
                slide: child.slide,
            });
            child.flatten(depth + 1, out);
        }
    }
}

impl NavTree {
    /// Build the tree. An empty delimiter keeps every title whole.
    pub fn build<S: AsRef<str>>(titles: &[S], delim: &str) -> Self {
        let mut root = Node::default();
        for (index, title) in titles.iter().enumerate() {
            let path = category_path(title.as_ref(), delim);
            let mut node = &mut root;
            for category in &path {
                node = node.child(category);
            }
            if node.slide.is_none() {
                node.slide = Some(index);
            }
        }

        let mut entries = Vec::new();
        root.flatten(0, &mut entries);
        Self { entries }
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Slide indices that own a marker, in tree order.
    pub fn marker_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().filter_map(|e| e.slide)
    }
}

fn category_path(title: &str, delim: &str) -> Vec<String> {
    let title = title.trim();
    if delim.is_empty() {
        return vec![title.to_string()];
    }
    let parts: Vec<String> = title
        .split(delim)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        vec![title.to_string()]
    } else {
        parts
    }
}
