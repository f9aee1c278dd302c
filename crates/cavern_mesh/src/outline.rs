//! # Outline Tracing
//!
//! Extracts the closed boundary polylines of a triangulated cave mesh.
//! The wall-extrusion and collision builders downstream consume nothing
//! but these loops.
//!
//! An edge is a *boundary edge* iff exactly one triangle contains both of
//! its vertices; interior edges are shared by exactly two. The boundary
//! graph of a welded marching-squares mesh is 2-regular, so tracing
//! unvisited boundary neighbors walks complete, closed loops.

use std::collections::HashMap;

use tracing::debug;

use crate::marching::CaveMesh;

/// One closed boundary polygon: vertex indices in walk order.
///
/// The loop is cyclic; the first vertex is not repeated at the end.
pub type OutlineLoop = Vec<u32>;

/// Reusable outline-tracing scratch.
///
/// The adjacency map and visited set are rebuilt per call, so one tracer
/// serves any number of meshes - sequentially, never concurrently.
#[derive(Debug, Default)]
pub struct OutlineTracer {
    triangles_by_vertex: Vec<Vec<usize>>,
    visited: Vec<bool>,
}

impl OutlineTracer {
    /// Creates an empty tracer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Traces all boundary loops of `mesh`, collinear vertices collapsed.
    ///
    /// Consecutive points whose direction to the next point is identical
    /// are dropped, leaving only direction-changing vertices: the minimal
    /// polygon. Directions compare on the mesh's integer lattice
    /// coordinates, so the collapse is exact for every cell size.
    #[must_use]
    pub fn trace(&mut self, mesh: &CaveMesh) -> Vec<OutlineLoop> {
        let loops: Vec<OutlineLoop> = self
            .trace_raw(mesh)
            .iter()
            .map(|raw| simplify(raw, mesh))
            .collect();
        debug!(loops = loops.len(), "outlines traced");
        loops
    }

    /// Traces all boundary loops without collinear collapse.
    ///
    /// Every boundary edge of the mesh appears in exactly one loop, so
    /// the loop lengths sum to [`boundary_edge_count`].
    #[must_use]
    pub fn trace_raw(&mut self, mesh: &CaveMesh) -> Vec<OutlineLoop> {
        self.rebuild(mesh);

        let mut loops = Vec::new();
        for vertex in 0..mesh.vertex_count() {
            #[allow(clippy::cast_possible_truncation)]
            let vertex = vertex as u32;
            if self.visited[vertex as usize] {
                continue;
            }
            let Some(next) = self.connected_outline_vertex(mesh, vertex) else {
                continue;
            };

            self.visited[vertex as usize] = true;
            let mut outline = vec![vertex];
            self.follow(mesh, next, &mut outline);
            loops.push(outline);
        }
        loops
    }

    /// Rebuilds the vertex-to-triangles map and clears the visited set.
    fn rebuild(&mut self, mesh: &CaveMesh) {
        self.triangles_by_vertex.clear();
        self.triangles_by_vertex
            .resize(mesh.vertex_count(), Vec::new());
        self.visited.clear();
        self.visited.resize(mesh.vertex_count(), false);

        for (triangle_index, triangle) in mesh.triangles.iter().enumerate() {
            for vertex in triangle {
                self.triangles_by_vertex[*vertex as usize].push(triangle_index);
            }
        }
    }

    /// Walks unvisited boundary neighbors until the loop closes.
    fn follow(&mut self, mesh: &CaveMesh, start: u32, outline: &mut OutlineLoop) {
        let mut vertex = start;
        loop {
            outline.push(vertex);
            self.visited[vertex as usize] = true;
            match self.connected_outline_vertex(mesh, vertex) {
                Some(next) => vertex = next,
                None => break,
            }
        }
    }

    /// First unvisited vertex sharing a boundary edge with `vertex`.
    fn connected_outline_vertex(&self, mesh: &CaveMesh, vertex: u32) -> Option<u32> {
        for &triangle_index in &self.triangles_by_vertex[vertex as usize] {
            for &candidate in &mesh.triangles[triangle_index] {
                if candidate != vertex
                    && !self.visited[candidate as usize]
                    && self.is_boundary_edge(mesh, vertex, candidate)
                {
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// Returns `true` iff exactly one triangle contains both vertices.
    fn is_boundary_edge(&self, mesh: &CaveMesh, a: u32, b: u32) -> bool {
        let mut shared = 0;
        for &triangle_index in &self.triangles_by_vertex[a as usize] {
            if mesh.triangles[triangle_index].contains(&b) {
                shared += 1;
                if shared > 1 {
                    return false;
                }
            }
        }
        shared == 1
    }
}

/// Counts the boundary edges of `mesh` by direct edge census.
///
/// Independent of the tracer; tests pit the two against each other.
#[must_use]
pub fn boundary_edge_count(mesh: &CaveMesh) -> usize {
    let mut edge_uses: HashMap<(u32, u32), u32> = HashMap::new();
    for triangle in &mesh.triangles {
        for (a, b) in [
            (triangle[0], triangle[1]),
            (triangle[1], triangle[2]),
            (triangle[2], triangle[0]),
        ] {
            let key = (a.min(b), a.max(b));
            *edge_uses.entry(key).or_insert(0) += 1;
        }
    }
    edge_uses.values().filter(|uses| **uses == 1).count()
}

/// Collapses runs of identical direction, cyclically.
fn simplify(outline: &OutlineLoop, mesh: &CaveMesh) -> OutlineLoop {
    let n = outline.len();
    if n < 3 {
        return outline.clone();
    }

    let coord = |i: usize| mesh.lattice_coords[outline[i] as usize];
    let mut simplified = Vec::new();
    for i in 0..n {
        let prev = coord((i + n - 1) % n);
        let here = coord(i);
        let next = coord((i + 1) % n);
        let incoming = [here[0] - prev[0], here[1] - prev[1]];
        let outgoing = [next[0] - here[0], next[1] - here[1]];
        if incoming != outgoing {
            simplified.push(outline[i]);
        }
    }
    simplified
}
