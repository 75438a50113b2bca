//! Strongest-topic selection over an attempt history
//!
//! Attempts are grouped by topic in first-seen order. The topic with the
//! highest success rate wins; ties go to the topic with more attempts, and
//! remaining ties to the topic seen first.

use crate::types::{Attempt, StrongestTopic};
use std::collections::HashMap;

#[derive(Debug, Default, Clone, Copy)]
struct TopicTally {
    total: u64,
    success: u64,
}

impl TopicTally {
    fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.success as f64 / self.total as f64 * 100.0
        }
    }
}

/// Pick the best-performing topic, or `None` for an empty history
pub fn strongest_topic<'a, I>(attempts: I) -> Option<StrongestTopic>
where
    I: IntoIterator<Item = &'a Attempt>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut tallies: Vec<(&'a str, TopicTally)> = Vec::new();

    for attempt in attempts {
        let slot = *index.entry(attempt.topic_id.as_str()).or_insert_with(|| {
            tallies.push((attempt.topic_id.as_str(), TopicTally::default()));
            tallies.len() - 1
        });

        let tally = &mut tallies[slot].1;
        tally.total += 1;
        if attempt.is_success() {
            tally.success += 1;
        }
    }

    let mut best: Option<StrongestTopic> = None;
    for (topic_id, tally) in tallies {
        let candidate = StrongestTopic {
            topic_id: topic_id.to_string(),
            total_attempts: tally.total,
            successful_attempts: tally.success,
            success_rate: tally.success_rate(),
        };

        let replace = match &best {
            None => true,
            Some(current) => {
                candidate.success_rate > current.success_rate
                    || (candidate.success_rate == current.success_rate
                        && candidate.total_attempts > current.total_attempts)
            }
        };

        if replace {
            best = Some(candidate);
        }
    }

    best
}
