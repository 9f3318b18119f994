//! Depth-first route search through the section graph.
//!
//! Choices are tried in the order they appear on each section and the first
//! complete route wins. This is not a shortest-path search: the declared
//! choice order is the tie-break. A section already on the current route is
//! never entered again, which bounds the search on cyclic stories.

use std::collections::HashSet;

use sa_core::{Choice, SectionId, Story};

/// Counters describing one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Sections whose choices were explored.
    pub expanded: usize,
    /// Branches that ended at a section without choices or a missing one.
    pub dead_ends: usize,
    /// Choices skipped because their target was already on the route.
    pub cycle_skips: usize,
}

/// A route search over one story.
pub struct PathSearch<'s> {
    story: &'s Story,
    stats: SearchStats,
}

struct Frame<'s> {
    choices: &'s [Choice],
    next: usize,
}

enum Visit<'s> {
    Found,
    Expand(&'s [Choice]),
    Fail,
}

impl<'s> PathSearch<'s> {
    /// Create a search over `story`.
    pub fn new(story: &'s Story) -> Self {
        Self {
            story,
            stats: SearchStats::default(),
        }
    }

    /// Counters from the last call to [`find`](Self::find).
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Find the first route from `start` to `end` that visits every section
    /// in `waypoints`. The route includes both endpoints.
    pub fn find(
        &mut self,
        start: &SectionId,
        end: &SectionId,
        waypoints: &[SectionId],
    ) -> Option<Vec<SectionId>> {
        self.stats = SearchStats::default();

        let mut path = vec![start.clone()];
        let mut on_path: HashSet<SectionId> = HashSet::from([start.clone()]);
        let mut frames = Vec::new();

        match self.visit(&path, end, waypoints) {
            Visit::Found => return Some(path),
            Visit::Expand(choices) => frames.push(Frame { choices, next: 0 }),
            Visit::Fail => return None,
        }

        while let Some(frame) = frames.last_mut() {
            let choices = frame.choices;
            let Some(choice) = choices.get(frame.next) else {
                frames.pop();
                if let Some(id) = path.pop() {
                    on_path.remove(&id);
                }
                continue;
            };
            frame.next += 1;

            let target = &choice.next;
            if on_path.contains(target) {
                self.stats.cycle_skips += 1;
                tracing::debug!(%target, "skipping section already on the route");
                continue;
            }

            path.push(target.clone());
            on_path.insert(target.clone());
            match self.visit(&path, end, waypoints) {
                Visit::Found => {
                    tracing::debug!(stats = ?self.stats, length = path.len(), "route found");
                    return Some(path);
                }
                Visit::Expand(choices) => frames.push(Frame { choices, next: 0 }),
                Visit::Fail => {
                    path.pop();
                    on_path.remove(target);
                }
            }
        }

        tracing::debug!(stats = ?self.stats, %start, %end, "no route");
        None
    }

    fn visit(&mut self, path: &[SectionId], end: &SectionId, waypoints: &[SectionId]) -> Visit<'s> {
        let Some(current) = path.last() else {
            return Visit::Fail;
        };
        if current == end {
            if waypoints.iter().all(|w| path.contains(w)) {
                return Visit::Found;
            }
            tracing::debug!(%end, "reached end without every waypoint");
            return Visit::Fail;
        }

        let story = self.story;
        match story.section(current) {
            None => {
                self.stats.dead_ends += 1;
                tracing::debug!(%current, "route leads to missing section");
                Visit::Fail
            }
            Some(section) if section.is_leaf() => {
                self.stats.dead_ends += 1;
                tracing::debug!(%current, "dead end");
                Visit::Fail
            }
            Some(section) => {
                self.stats.expanded += 1;
                Visit::Expand(section.choices())
            }
        }
    }
}

/// Find the first route from `start` to `end` through every waypoint.
///
/// Returns `None` when no such route exists.
pub fn find_path(
    story: &Story,
    start: &SectionId,
    end: &SectionId,
    waypoints: &[SectionId],
) -> Option<Vec<SectionId>> {
    PathSearch::new(story).find(start, end, waypoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sa_core::Section;

    fn id(n: i64) -> SectionId {
        SectionId::from(n)
    }

    fn graph(edges: &[(i64, i64)]) -> Story {
        let mut story = Story::new("graph");
        for &(from, to) in edges {
            for n in [from, to] {
                story.sections.entry(id(n)).or_insert_with(|| Section::new(n.to_string()));
            }
            story.add_choice(&id(from), to, "").unwrap();
        }
        story
    }

    #[test]
    fn follows_declared_order() {
        let story = graph(&[(1, 2), (2, 3), (1, 4)]);
        assert_eq!(find_path(&story, &id(1), &id(3), &[]), Some(vec![id(1), id(2), id(3)]));
        assert_eq!(find_path(&story, &id(1), &id(4), &[]), Some(vec![id(1), id(4)]));
        assert_eq!(find_path(&story, &id(1), &id(4), &[id(3)]), None);
    }

    #[test]
    fn first_match_not_shortest() {
        let story = graph(&[(1, 2), (2, 3), (1, 3)]);
        assert_eq!(find_path(&story, &id(1), &id(3), &[]), Some(vec![id(1), id(2), id(3)]));
    }

    #[test]
    fn waypoints_force_detours() {
        let story = graph(&[(1, 3), (1, 2), (2, 3)]);
        assert_eq!(find_path(&story, &id(1), &id(3), &[]), Some(vec![id(1), id(3)]));
        assert_eq!(
            find_path(&story, &id(1), &id(3), &[id(2)]),
            Some(vec![id(1), id(2), id(3)])
        );
    }

    #[test]
    fn waypoints_match_text_ids() {
        let story = graph(&[(1, 2), (2, 3)]);
        let path = find_path(&story, &SectionId::from("1"), &id(3), &[SectionId::from("2")]);
        assert_eq!(path.map(|p| p.len()), Some(3));
    }

    #[test]
    fn start_equal_to_end() {
        let story = graph(&[(1, 2)]);
        assert_eq!(find_path(&story, &id(1), &id(1), &[]), Some(vec![id(1)]));
        assert_eq!(find_path(&story, &id(1), &id(1), &[id(2)]), None);
    }

    #[test]
    fn cycles_terminate() {
        let mut story = graph(&[(1, 2), (2, 1)]);
        story.sections.insert(id(9), Section::new("elsewhere"));
        let mut search = PathSearch::new(&story);
        assert_eq!(search.find(&id(1), &id(9), &[]), None);
        assert_eq!(search.stats().cycle_skips, 1);
        assert_eq!(search.stats().expanded, 2);
    }

    #[test]
    fn missing_sections_are_dead_ends() {
        let mut story = graph(&[(1, 2), (1, 3)]);
        story.sections.remove(&id(2));
        let mut search = PathSearch::new(&story);
        assert_eq!(search.find(&id(1), &id(3), &[]), Some(vec![id(1), id(3)]));
        assert_eq!(search.stats().dead_ends, 1);

        assert_eq!(find_path(&story, &id(42), &id(3), &[]), None);
        // the end itself need not exist
        assert_eq!(find_path(&story, &id(1), &id(2), &[]), Some(vec![id(1), id(2)]));
    }

    proptest::proptest! {
        #[test]
        fn routes_are_simple_and_follow_choices(
            edges in proptest::collection::vec((0i64..8, 0i64..8), 0..24),
            start in 0i64..8,
            end in 0i64..8,
        ) {
            let story = graph(&edges);
            if let Some(path) = find_path(&story, &id(start), &id(end), &[]) {
                proptest::prop_assert_eq!(path.first(), Some(&id(start)));
                proptest::prop_assert_eq!(path.last(), Some(&id(end)));
                let unique: HashSet<_> = path.iter().collect();
                proptest::prop_assert_eq!(unique.len(), path.len());
                for pair in path.windows(2) {
                    let section = story.section(&pair[0]).unwrap();
                    proptest::prop_assert!(section.choices().iter().any(|c| c.next == pair[1]));
                }
            }
        }
    }
}
