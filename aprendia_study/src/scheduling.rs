use crate::{deck::Deck, review::ReviewSignal};


/// Decides where a card goes after it has been reviewed.
///
/// Implementations must only reorder the deck: no card may be added, removed or duplicated.
pub trait SchedulingPolicy {
    fn schedule(&self, deck: &mut Deck, signal: ReviewSignal);
}


/// Sends the reviewed card to the end of the deck regardless of the signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequeueToTail;

impl SchedulingPolicy for RequeueToTail {
    fn schedule(&self, deck: &mut Deck, _signal: ReviewSignal) {
        deck.requeue_current();
    }
}



#[cfg(test)]
mod test {
    use aprendia_core::api_models::SentencePair;

    use super::*;

    #[test]
    fn every_signal_requeues_identically() {
        let sentences: Vec<SentencePair> = ["A", "B", "C"]
            .into_iter()
            .map(|text| SentencePair::new(text, text))
            .collect();

        let mut expected = Deck::materialize(sentences.clone());
        expected.requeue_current();

        for signal in ReviewSignal::ALL {
            let mut deck = Deck::materialize(sentences.clone());
            RequeueToTail.schedule(&mut deck, signal);

            assert_eq!(deck, expected, "signal {} scheduled differently", signal);
        }
    }
}
