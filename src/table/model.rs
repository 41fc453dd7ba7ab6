use crate::models::column::{Column, ItemFlags, Orientation, SortOrder};
use crate::models::node_stats::{NodeId, NodeStats};
use crate::table::cache::PeerSnapshotCache;
use crate::table::provider::SnapshotProvider;
use crate::table::sorting::SortKey;
use std::sync::Arc;
use tracing::debug;

/// Position of a valid cell in the table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellIndex {
    pub row: usize,
    pub column: Column,
}

/// What a tabular view needs from its model
pub trait TableModel {
    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    /// `None` unless both row and column are in range
    fn index(&self, row: usize, column: usize) -> Option<CellIndex>;

    /// Display text of a cell
    fn cell_value(&self, row: usize, column: usize) -> Option<String>;

    fn header_label(&self, section: usize, orientation: Orientation) -> Option<&'static str>;

    fn flags(&self, row: usize, column: usize) -> ItemFlags;

    /// An unknown column index turns sorting off
    fn sort(&mut self, column: usize, order: SortOrder);
}

/// Notified around every refresh; the whole layout is treated as changed
pub trait LayoutObserver: Send + Sync {
    fn layout_about_to_change(&self);

    fn layout_changed(&self);
}

/// Table model over a snapshot of the connected peers
pub struct PeerTableModel {
    cache: PeerSnapshotCache,
    provider: Arc<dyn SnapshotProvider>,
    observers: Vec<Arc<dyn LayoutObserver>>,
}

impl PeerTableModel {
    /// Create the model and load the initial snapshot
    pub fn new(provider: Arc<dyn SnapshotProvider>) -> Self {
        let mut model = Self {
            cache: PeerSnapshotCache::new(),
            provider,
            observers: Vec::new(),
        };
        model.refresh();
        model
    }

    pub fn subscribe(&mut self, observer: Arc<dyn LayoutObserver>) {
        self.observers.push(observer);
    }

    /// Reload the snapshot from the provider.
    /// Returns `false` if the peer list was busy and the old snapshot was kept.
    pub fn refresh(&mut self) -> bool {
        for observer in &self.observers {
            observer.layout_about_to_change();
        }

        let refreshed = self.cache.refresh(self.provider.as_ref());

        for observer in &self.observers {
            observer.layout_changed();
        }

        refreshed
    }

    /// Sort by `key`, or restore provider order with `None`
    pub fn sort_by(&mut self, key: Option<SortKey>) {
        debug!(sort = ?key, "Sort requested");
        self.cache.set_sort_key(key);

        if self.refresh() {
            return;
        }

        // Peer list was busy: reorder what is already shown
        for observer in &self.observers {
            observer.layout_about_to_change();
        }
        self.cache.resort();
        for observer in &self.observers {
            observer.layout_changed();
        }
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.cache.sort_key()
    }

    pub fn node_stats(&self, row: usize) -> Option<&NodeStats> {
        self.cache.index(row)
    }

    pub fn row_by_node_id(&self, node_id: NodeId) -> Option<usize> {
        self.cache.row_by_node_id(node_id)
    }

    pub fn rows(&self) -> impl Iterator<Item = &NodeStats> {
        self.cache.iter()
    }
}

impl TableModel for PeerTableModel {
    fn row_count(&self) -> usize {
        self.cache.size()
    }

    fn column_count(&self) -> usize {
        Column::ALL.len()
    }

    fn index(&self, row: usize, column: usize) -> Option<CellIndex> {
        self.cache.index(row)?;
        let column = Column::from_index(column)?;
        Some(CellIndex { row, column })
    }

    fn cell_value(&self, row: usize, column: usize) -> Option<String> {
        let stats = self.cache.index(row)?;
        let value = match Column::from_index(column)? {
            Column::Address => stats.addr_name.clone(),
            Column::Subversion => stats.clean_sub_ver.clone(),
            Column::Ping => stats.ping_display(),
        };
        Some(value)
    }

    fn header_label(&self, section: usize, orientation: Orientation) -> Option<&'static str> {
        match orientation {
            Orientation::Horizontal => Column::from_index(section).map(Column::label),
            Orientation::Vertical => None,
        }
    }

    fn flags(&self, row: usize, column: usize) -> ItemFlags {
        match self.index(row, column) {
            Some(_) => ItemFlags {
                selectable: true,
                enabled: true,
            },
            None => ItemFlags::default(),
        }
    }

    fn sort(&mut self, column: usize, order: SortOrder) {
        let key = Column::from_index(column).map(|column| SortKey::new(column, order));
        self.sort_by(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::node_list::NodeList;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<&'static str>>,
    }

    impl LayoutObserver for RecordingObserver {
        fn layout_about_to_change(&self) {
            self.events.lock().unwrap().push("about_to_change");
        }

        fn layout_changed(&self) {
            self.events.lock().unwrap().push("changed");
        }
    }

    /// Serves a fixed list, optionally pretending to be busy
    struct ToggleProvider {
        nodes: Vec<NodeStats>,
        busy: AtomicBool,
        calls: AtomicUsize,
    }

    impl SnapshotProvider for ToggleProvider {
        fn try_enumerate(&self) -> Option<Vec<NodeStats>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.busy.load(Ordering::SeqCst) {
                None
            } else {
                Some(self.nodes.clone())
            }
        }
    }

    fn sample_nodes() -> Vec<NodeStats> {
        vec![
            NodeStats::new(1, "10.0.0.2:8333", "/Satoshi:0.9.1/", 0.5),
            NodeStats::new(2, "10.0.0.1:8333", "/Satoshi:0.8.6/", 0.1),
            NodeStats::new(3, "10.0.0.3:8333", "/Satoshi:0.9.0/", 0.25),
        ]
    }

    fn ids(model: &PeerTableModel) -> Vec<NodeId> {
        model.rows().map(|n| n.node_id).collect()
    }

    #[test]
    fn test_construction_loads_initial_snapshot() {
        let list = Arc::new(NodeList::with_nodes(sample_nodes()));
        let model = PeerTableModel::new(list);

        assert_eq!(model.row_count(), 3);
        assert_eq!(model.column_count(), 3);
        assert!(model.sort_key().is_none());
        assert_eq!(ids(&model), vec![1, 2, 3]);
    }

    #[test]
    fn test_cell_values() {
        let list = Arc::new(NodeList::with_nodes(sample_nodes()));
        let model = PeerTableModel::new(list);

        assert_eq!(model.cell_value(0, 0).as_deref(), Some("10.0.0.2:8333"));
        assert_eq!(model.cell_value(0, 1).as_deref(), Some("/Satoshi:0.9.1/"));
        assert_eq!(model.cell_value(0, 2).as_deref(), Some("0.500"));
        assert_eq!(model.cell_value(2, 2).as_deref(), Some("0.250"));
        assert!(model.cell_value(3, 0).is_none());
        assert!(model.cell_value(0, 3).is_none());
    }

    #[test]
    fn test_header_labels() {
        let list = Arc::new(NodeList::new());
        let model = PeerTableModel::new(list);

        assert_eq!(model.header_label(0, Orientation::Horizontal), Some("Address"));
        assert_eq!(model.header_label(1, Orientation::Horizontal), Some("Subversion"));
        assert_eq!(model.header_label(2, Orientation::Horizontal), Some("Ping (secs)"));
        assert_eq!(model.header_label(3, Orientation::Horizontal), None);
        assert_eq!(model.header_label(0, Orientation::Vertical), None);
    }

    #[test]
    fn test_index_and_flags() {
        let list = Arc::new(NodeList::with_nodes(sample_nodes()));
        let model = PeerTableModel::new(list);

        assert_eq!(
            model.index(1, 2),
            Some(CellIndex {
                row: 1,
                column: Column::Ping
            })
        );
        assert!(model.index(3, 0).is_none());
        assert!(model.index(0, 5).is_none());

        let flags = model.flags(0, 0);
        assert!(flags.selectable && flags.enabled);
        assert_eq!(model.flags(9, 0), ItemFlags::default());
    }

    #[test]
    fn test_sort_by_column_index() {
        let list = Arc::new(NodeList::with_nodes(sample_nodes()));
        let mut model = PeerTableModel::new(list);

        model.sort(Column::Ping.index(), SortOrder::Ascending);
        assert_eq!(ids(&model), vec![2, 3, 1]);
        assert_eq!(model.row_by_node_id(2), Some(0));

        model.sort(Column::Address.index(), SortOrder::Descending);
        assert_eq!(ids(&model), vec![3, 1, 2]);

        model.sort(Column::Subversion.index(), SortOrder::Ascending);
        assert_eq!(ids(&model), vec![2, 3, 1]);
    }

    #[test]
    fn test_unknown_column_clears_sorting() {
        let list = Arc::new(NodeList::with_nodes(sample_nodes()));
        let mut model = PeerTableModel::new(list);

        model.sort(Column::Ping.index(), SortOrder::Ascending);
        assert!(model.sort_key().is_some());

        model.sort(usize::MAX, SortOrder::Ascending);
        assert!(model.sort_key().is_none());
        assert_eq!(ids(&model), vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_persists_across_refresh() {
        let list = Arc::new(NodeList::with_nodes(sample_nodes()));
        let mut model = PeerTableModel::new(list.clone());
        model.sort(Column::Ping.index(), SortOrder::Ascending);

        list.connect(NodeStats::new(4, "10.0.0.4:8333", "/Satoshi:0.9.1/", 0.05));
        assert!(model.refresh());

        assert_eq!(ids(&model), vec![4, 2, 3, 1]);
        assert_eq!(model.row_by_node_id(4), Some(0));
        assert_eq!(model.row_by_node_id(1), Some(3));
    }

    #[test]
    fn test_ping_update_reorders_on_refresh() {
        let list = Arc::new(NodeList::with_nodes(sample_nodes()));
        let mut model = PeerTableModel::new(list.clone());
        model.sort(Column::Ping.index(), SortOrder::Ascending);
        assert_eq!(ids(&model), vec![2, 3, 1]);

        assert!(list.update_ping(1, 0.01));
        // cached rows keep the old ping until the next refresh
        assert_eq!(model.cell_value(2, Column::Ping.index()).as_deref(), Some("0.500"));

        assert!(model.refresh());
        assert_eq!(ids(&model), vec![1, 2, 3]);
        assert_eq!(model.row_by_node_id(1), Some(0));
        assert_eq!(model.cell_value(0, Column::Ping.index()).as_deref(), Some("0.010"));
    }

    #[test]
    fn test_refresh_notifies_observers_in_order() {
        let list = Arc::new(NodeList::with_nodes(sample_nodes()));
        let mut model = PeerTableModel::new(list);
        let observer = Arc::new(RecordingObserver::default());
        model.subscribe(observer.clone());

        model.refresh();

        let events = observer.events.lock().unwrap().clone();
        assert_eq!(events, vec!["about_to_change", "changed"]);
    }

    #[test]
    fn test_sort_while_busy_reorders_current_snapshot() {
        let provider = Arc::new(ToggleProvider {
            nodes: sample_nodes(),
            busy: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        });
        let mut model = PeerTableModel::new(provider.clone());
        let observer = Arc::new(RecordingObserver::default());
        model.subscribe(observer.clone());

        provider.busy.store(true, Ordering::SeqCst);
        model.sort(Column::Ping.index(), SortOrder::Descending);

        assert_eq!(ids(&model), vec![1, 3, 2]);
        assert_eq!(model.row_by_node_id(1), Some(0));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);

        let events = observer.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec!["about_to_change", "changed", "about_to_change", "changed"]
        );
    }

    #[test]
    fn test_busy_refresh_keeps_previous_rows() {
        let provider = Arc::new(ToggleProvider {
            nodes: sample_nodes(),
            busy: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        });
        let mut model = PeerTableModel::new(provider.clone());

        provider.busy.store(true, Ordering::SeqCst);
        assert!(!model.refresh());

        assert_eq!(model.row_count(), 3);
        assert_eq!(model.node_stats(1).map(|n| n.node_id), Some(2));
    }
}
