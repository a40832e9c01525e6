//! Quadtree spatial index over axis-aligned record bounds.
//!
//! Rebuilt from scratch every frame: `clear`, then one `insert` per body,
//! then per-body `retrieve` queries. Retrieval is node-granular and
//! over-approximates on purpose — it returns candidates, not proven
//! collisions; the narrow phase filters them.

use glam::Vec2;

use super::body::BodyId;
use crate::consts::{INDEX_MAX_DEPTH, INDEX_SPLIT_THRESHOLD};

/// Axis-aligned rectangle: min corner plus extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rect of the given extents centered on a point
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            x: center.x - width * 0.5,
            y: center.y - height * 0.5,
            width,
            height,
        }
    }

    /// Open-interval overlap test; rects that only share an edge don't count
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// What the index stores per body: bounds plus enough payload for the
/// narrow phase to look the body up and size its test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexRecord {
    pub bounds: Rect,
    pub radius: f32,
    pub body: BodyId,
}

#[derive(Debug)]
struct Node {
    bounds: Rect,
    depth: u8,
    records: Vec<IndexRecord>,
    /// Indices of the four child nodes once split
    children: Option<[usize; 4]>,
}

/// Region quadtree with a split threshold and a depth cap.
///
/// A record is pushed into every child its bounds overlap, so straddling
/// records are duplicated across children — expected, and deduplicated by the
/// engine's pair collection. At the depth cap a node grows instead of
/// splitting, which bounds recursion when many bodies cluster at one point.
#[derive(Debug)]
pub struct Quadtree {
    nodes: Vec<Node>,
    split_threshold: usize,
    max_depth: u8,
}

impl Quadtree {
    pub fn new(bounds: Rect) -> Self {
        Self::with_limits(bounds, INDEX_SPLIT_THRESHOLD, INDEX_MAX_DEPTH)
    }

    pub fn with_limits(bounds: Rect, split_threshold: usize, max_depth: u8) -> Self {
        Self {
            nodes: vec![Node {
                bounds,
                depth: 0,
                records: Vec::new(),
                children: None,
            }],
            split_threshold,
            max_depth,
        }
    }

    /// Drop all records and interior nodes, keeping the root allocation.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        let root = &mut self.nodes[0];
        root.records.clear();
        root.children = None;
    }

    pub fn insert(&mut self, record: IndexRecord) {
        self.insert_at(0, record);
    }

    fn insert_at(&mut self, idx: usize, record: IndexRecord) {
        if let Some(children) = self.nodes[idx].children {
            let mut placed = false;
            for child in children {
                if self.nodes[child].bounds.intersects(&record.bounds) {
                    self.insert_at(child, record);
                    placed = true;
                }
            }
            if !placed {
                // Overlaps no child (e.g. outside the domain): keep it here
                self.nodes[idx].records.push(record);
            }
            return;
        }

        self.nodes[idx].records.push(record);
        if self.nodes[idx].records.len() > self.split_threshold
            && self.nodes[idx].depth < self.max_depth
        {
            self.split(idx);
        }
    }

    /// Subdivide a leaf into four quadrants and redistribute its records.
    fn split(&mut self, idx: usize) {
        let Rect { x, y, width, height } = self.nodes[idx].bounds;
        let depth = self.nodes[idx].depth + 1;
        let (hw, hh) = (width * 0.5, height * 0.5);

        let first = self.nodes.len();
        for bounds in [
            Rect::new(x, y, hw, hh),
            Rect::new(x + hw, y, hw, hh),
            Rect::new(x, y + hh, hw, hh),
            Rect::new(x + hw, y + hh, hw, hh),
        ] {
            self.nodes.push(Node {
                bounds,
                depth,
                records: Vec::new(),
                children: None,
            });
        }
        self.nodes[idx].children = Some([first, first + 1, first + 2, first + 3]);

        let records = std::mem::take(&mut self.nodes[idx].records);
        for record in records {
            self.insert_at(idx, record);
        }
    }

    /// All records held by nodes whose bounds intersect the query.
    pub fn retrieve(&self, query: Rect) -> Vec<IndexRecord> {
        let mut out = Vec::new();
        self.retrieve_into(query, &mut out);
        out
    }

    /// `retrieve` into a caller-owned buffer (cleared first).
    pub fn retrieve_into(&self, query: Rect, out: &mut Vec<IndexRecord>) {
        out.clear();
        self.collect(0, &query, out);
    }

    fn collect(&self, idx: usize, query: &Rect, out: &mut Vec<IndexRecord>) {
        let node = &self.nodes[idx];
        if !node.bounds.intersects(query) {
            return;
        }
        out.extend_from_slice(&node.records);
        if let Some(children) = node.children {
            for child in children {
                self.collect(child, query, out);
            }
        }
    }

    /// Total node count (diagnostics)
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
