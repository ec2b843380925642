use serde::{Deserialize, Serialize};
use seedwalk_graph::{EventId, EventRecord};

/// Render the ` -(id)-> ` trace of an event id sequence.
pub fn render_trace<I>(ids: I) -> String
where
    I: IntoIterator<Item = EventId>,
{
    ids.into_iter().map(|id| format!(" -({id})-> ")).collect()
}

/// One generated scenario: owned copies of the events fired during a walk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeedTest {
    events: Vec<EventRecord>,
}

impl SeedTest {
    pub fn new(events: Vec<EventRecord>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn event_ids(&self) -> Vec<EventId> {
        self.events.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn trace(&self) -> String {
        render_trace(self.events.iter().map(|e| e.id))
    }

    pub fn into_events(self) -> Vec<EventRecord> {
        self.events
    }
}

/// Ordered collection of seed tests from one generation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeedTestSuite {
    tests: Vec<SeedTest>,
}

impl SeedTestSuite {
    pub fn new() -> Self {
        Self { tests: Vec::new() }
    }

    pub fn push(&mut self, test: SeedTest) {
        self.tests.push(test);
    }

    pub fn tests(&self) -> &[SeedTest] {
        &self.tests
    }

    pub fn get(&self, index: usize) -> Option<&SeedTest> {
        self.tests.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SeedTest> {
        self.tests.iter()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn into_tests(self) -> Vec<SeedTest> {
        self.tests
    }
}

impl<'a> IntoIterator for &'a SeedTestSuite {
    type Item = &'a SeedTest;
    type IntoIter = std::slice::Iter<'a, SeedTest>;

    fn into_iter(self) -> Self::IntoIter {
        self.tests.iter()
    }
}
