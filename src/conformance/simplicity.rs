use crate::petri_net::petri_net_struct::PetriNet;

///
/// Simplicity of a model: the inverse of its total size
/// (`|places| + |transitions| + |flow_relation|`)
///
/// Strictly decreasing in model size. A completely empty model yields `0.0`
/// instead of dividing by zero; any net produced by discovery has at least one
/// transition and therefore a positive simplicity.
///
pub fn simplicity(net: &PetriNet) -> f64 {
    let size = net.places.len() + net.transitions.len() + net.flow_relation.len();
    if size == 0 {
        0.0
    } else {
        1.0 / size as f64
    }
}
