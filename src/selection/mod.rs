pub mod filters;

use std::collections::BTreeSet;

use crate::history::ExclusionSet;
use crate::topics::{TopicExtractor, TopicTable, TopicTagSet};
use crate::types::{
	Candidates, Category, CategoryOutcome, CategoryTrace, Item, Pick, PickKind, Selection,
};
pub use filters::{CandidateKeys, Rejection, RunLedger};

pub struct DigestSelector<X> {
	topics: X,
}

impl Default for DigestSelector<TopicTable> {
	fn default() -> Self {
		Self {
			topics: TopicTable::default(),
		}
	}
}

/// A chosen candidate, with what it will claim in the run ledger.
struct Admitted<'a> {
	item: &'a Item,
	keys: CandidateKeys,
	topics: Option<TopicTagSet>,
}

impl<X> DigestSelector<X>
where
	X: TopicExtractor,
{
	pub fn new(topics: X) -> Self {
		Self { topics }
	}

	/// Pick at most one item per category, in the order `candidates` lists them.
	///
	/// Categories in `topic_overlap` skip topic suppression and do not claim
	/// topics for later categories. A non-empty list always yields a pick.
	/// A fallback pick claims its title and URL but no topics, so it never
	/// pushes a later category off its best candidate.
	pub fn select(
		&self,
		candidates: &Candidates,
		exclusions: &ExclusionSet,
		topic_overlap: &BTreeSet<Category>,
	) -> Selection {
		let mut ledger = RunLedger::new();
		let mut picks = Vec::with_capacity(candidates.len());
		let mut outcomes = Vec::with_capacity(candidates.len());

		for list in candidates.iter() {
			let category = list.category;
			let allow_overlap = topic_overlap.contains(&category);
			let mut trace = CategoryTrace::default();

			// 1. Filter pipeline: history -> identity -> topic -> first survivor
			let admitted = self.first_admitted(
				category,
				&list.items,
				allow_overlap,
				exclusions,
				&ledger,
				&mut trace,
			);

			// 2. Fallback: top valid candidate, even if it repeats
			let chosen = match admitted {
				Some(a) => Some((a, PickKind::Fresh)),
				None => self.fallback(category, &list.items).map(|a| (a, PickKind::Fallback)),
			};

			let outcome = match chosen {
				Some((a, kind)) => {
					ledger.record(&a.keys, a.topics.as_ref());
					match kind {
						PickKind::Fresh => {
							tracing::info!(%category, title = %a.item.title, "selected")
						}
						PickKind::Fallback => tracing::warn!(
							%category,
							title = %a.item.title,
							"no candidate passed dedup, falling back to top item"
						),
					}
					picks.push(Pick {
						category,
						kind,
						item: a.item.clone(),
					});
					Some(kind)
				}
				None => {
					tracing::info!(%category, "no candidates, category omitted");
					None
				}
			};

			outcomes.push(CategoryOutcome {
				category,
				outcome,
				trace,
			});
		}

		debug_assert!(
			{
				let fresh: Vec<&Pick> =
					picks.iter().filter(|p| p.kind == PickKind::Fresh).collect();
				let titles: BTreeSet<_> = fresh.iter().map(|p| p.item.title_key()).collect();
				titles.len() == fresh.len()
			},
			"fresh picks must have distinct titles"
		);

		Selection { picks, outcomes }
	}

	fn first_admitted<'a>(
		&self,
		category: Category,
		items: &'a [Item],
		allow_overlap: bool,
		exclusions: &ExclusionSet,
		ledger: &RunLedger,
		trace: &mut CategoryTrace,
	) -> Option<Admitted<'a>> {
		for item in items {
			trace.considered += 1;
			match self.screen(item, allow_overlap, exclusions, ledger) {
				Ok(admitted) => return Some(admitted),
				Err(rejection) => {
					match rejection {
						Rejection::Invalid => {
							trace.skipped_invalid += 1;
							tracing::warn!(
								%category,
								url = %item.url,
								"skipping candidate without a title"
							);
						}
						Rejection::History => trace.rejected_by_history += 1,
						Rejection::Identity => trace.rejected_by_identity += 1,
						Rejection::Topic => trace.rejected_by_topic += 1,
					}
					tracing::debug!(
						%category,
						title = %item.title,
						?rejection,
						"candidate rejected"
					);
				}
			}
		}
		None
	}

	fn screen<'a>(
		&self,
		item: &'a Item,
		allow_overlap: bool,
		exclusions: &ExclusionSet,
		ledger: &RunLedger,
	) -> Result<Admitted<'a>, Rejection> {
		filters::require_title(item)?;
		let keys = CandidateKeys::of(item);
		filters::exclude_by_history(&keys, exclusions)?;
		filters::exclude_by_identity(&keys, ledger)?;

		let topics = if allow_overlap {
			None
		} else {
			let topics = self.topics.extract(&item.topic_text());
			filters::exclude_by_topic(&topics, ledger)?;
			Some(topics)
		};

		Ok(Admitted { item, keys, topics })
	}

	fn fallback<'a>(&self, category: Category, items: &'a [Item]) -> Option<Admitted<'a>> {
		let item = items.iter().find(|item| item.is_valid())?;
		if !std::ptr::eq(item, &items[0]) {
			tracing::debug!(%category, "top candidate invalid, falling back to first valid one");
		}
		Some(Admitted {
			item,
			keys: CandidateKeys::of(item),
			topics: None,
		})
	}
}
