pub mod dijkstra_result;
pub mod vertex_distance_queue;
