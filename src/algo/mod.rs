/*!
# Graph Algorithms

Algorithms built on top of any [`GraphView`]:
- [`GraphMetrics`] computes and memoizes degrees, neighborhoods, triangles, assortativity,
  per-edge similarities and eccentricities,
- [`GraphWalker`] drives step-wise walks guided by a [`NextNodeSelector`] such as [`RandomWalker`].

```rust
use flatgraphs::algo::*;
```
*/

mod metrics;
mod walker;

use crate::{prelude::*, *};

pub use metrics::*;
pub use walker::*;
