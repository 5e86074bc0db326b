use crate::config::SearchConfig;
use crate::error::MctsError;
use crate::game_state::GameState;
use crate::mcts_node::MctsNode;
use crate::random::{RandomGenerator, StandardRandomGenerator};
use crate::rollout::{RolloutPolicy, UniformRandomRollout};
use ego_tree::{NodeId, NodeRef, Tree};
use std::time::Instant;
use tracing::{debug, trace};

/// Runs a complete UCT search from `state` and returns the most visited move.
///
/// `random` is borrowed so one stream can be shared across successive calls; seed it for
/// reproducible results. Fails with [`MctsError::NoMovesAvailable`] on a terminal state
/// without building a tree.
pub fn search<S: GameState, R: RandomGenerator>(
    state: S,
    config: SearchConfig,
    random: &mut R,
) -> Result<S::Move, MctsError> {
    MonteCarloTreeSearch::builder(state)
        .with_config(config)
        .with_random_generator(random)
        .build()?
        .run()
}

/// The main struct for running the Monte Carlo Tree Search algorithm.
///
/// It holds the search tree, the random number generator, the rollout policy and the
/// configuration. The tree lives as long as this struct; drop it once the move is chosen.
pub struct MonteCarloTreeSearch<
    S: GameState,
    R: RandomGenerator = StandardRandomGenerator,
    P: RolloutPolicy<S> = UniformRandomRollout,
> {
    tree: Tree<MctsNode<S>>,
    root_id: NodeId,
    random: R,
    rollout_policy: P,
    config: SearchConfig,
}

/// A builder for creating instances of `MonteCarloTreeSearch`.
///
/// Starts out with [`SearchConfig::default`], an OS-seeded [`StandardRandomGenerator`] and
/// [`UniformRandomRollout`].
pub struct MonteCarloTreeSearchBuilder<S, R, P> {
    state: S,
    random_generator: R,
    rollout_policy: P,
    config: SearchConfig,
}

impl<S: GameState> MonteCarloTreeSearchBuilder<S, StandardRandomGenerator, UniformRandomRollout> {
    /// Creates a new builder with the given initial game state.
    pub fn new(state: S) -> Self {
        Self {
            state,
            random_generator: StandardRandomGenerator::default(),
            rollout_policy: UniformRandomRollout,
            config: SearchConfig::default(),
        }
    }
}

impl<S: GameState, R: RandomGenerator, P: RolloutPolicy<S>> MonteCarloTreeSearchBuilder<S, R, P> {
    /// Sets the random number generator for the search.
    pub fn with_random_generator<Q: RandomGenerator>(
        self,
        rg: Q,
    ) -> MonteCarloTreeSearchBuilder<S, Q, P> {
        MonteCarloTreeSearchBuilder {
            state: self.state,
            random_generator: rg,
            rollout_policy: self.rollout_policy,
            config: self.config,
        }
    }

    /// Replaces the rollout policy used in the simulation phase.
    pub fn with_rollout_policy<Q: RolloutPolicy<S>>(
        self,
        policy: Q,
    ) -> MonteCarloTreeSearchBuilder<S, R, Q> {
        MonteCarloTreeSearchBuilder {
            state: self.state,
            random_generator: self.random_generator,
            rollout_policy: policy,
            config: self.config,
        }
    }

    /// Replaces the whole search configuration.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the number of iterations run by [`MonteCarloTreeSearch::run`].
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.config.iterations = iterations;
        self
    }

    /// Sets the UCB1 exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.config.exploration_constant = c;
        self
    }

    /// Builds the `MonteCarloTreeSearch` instance with the configured parameters.
    pub fn build(self) -> Result<MonteCarloTreeSearch<S, R, P>, MctsError> {
        MonteCarloTreeSearch::new(
            self.state,
            self.random_generator,
            self.rollout_policy,
            self.config,
        )
    }
}

impl<S: GameState> MonteCarloTreeSearch<S> {
    /// Returns a new builder for `MonteCarloTreeSearch`.
    pub fn builder(
        state: S,
    ) -> MonteCarloTreeSearchBuilder<S, StandardRandomGenerator, UniformRandomRollout> {
        MonteCarloTreeSearchBuilder::new(state)
    }

    /// Builds a search with the default configuration and an OS-seeded generator.
    pub fn from_state(state: S) -> Result<Self, MctsError> {
        MonteCarloTreeSearchBuilder::new(state).build()
    }
}

impl<S: GameState, R: RandomGenerator, P: RolloutPolicy<S>> MonteCarloTreeSearch<S, R, P> {
    /// Creates a new `MonteCarloTreeSearch` instance.
    ///
    /// It is recommended to use the builder pattern via `MonteCarloTreeSearch::builder()` instead.
    pub fn new(
        state: S,
        random: R,
        rollout_policy: P,
        config: SearchConfig,
    ) -> Result<Self, MctsError> {
        config.validate()?;
        if state.is_terminal() {
            return Err(MctsError::NoMovesAvailable);
        }

        let root = MctsNode::new(None, state, config.exploration_constant);
        let tree = Tree::new(root);
        let root_id = tree.root().id();

        Ok(Self {
            tree,
            root_id,
            random,
            rollout_policy,
            config,
        })
    }

    /// Returns an immutable reference to the underlying search tree.
    pub fn get_tree(&self) -> &Tree<MctsNode<S>> {
        &self.tree
    }

    /// Returns a reference to the root node of the search tree.
    pub fn get_root(&self) -> NodeRef<'_, MctsNode<S>> {
        self.tree.root()
    }

    /// Returns the arena id of the root node.
    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    /// Returns the configuration this search was built with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn node(&self, node_id: NodeId) -> Result<NodeRef<'_, MctsNode<S>>, MctsError> {
        self.tree.get(node_id).ok_or(MctsError::UnknownNode(node_id))
    }

    /// Runs the configured number of iterations, or fewer if the time limit runs out, and
    /// returns the most visited move.
    pub fn run(&mut self) -> Result<S::Move, MctsError> {
        let started = Instant::now();
        let deadline = self.config.time_limit.map(|limit| started + limit);
        debug!(
            iterations = self.config.iterations,
            simulations_per_iteration = self.config.simulations_per_iteration,
            exploration_constant = self.config.exploration_constant,
            "starting search"
        );

        let mut completed = 0;
        while completed < self.config.iterations {
            if completed > 0 && deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                debug!(completed, "time limit reached, stopping early");
                break;
            }
            self.iterate()?;
            completed += 1;
        }

        let best_move = self.best_move()?;
        debug!(
            best_move = ?best_move,
            completed,
            root_visits = self.get_root().value().visits,
            nodes = self.tree.nodes().count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search complete"
        );
        Ok(best_move)
    }

    /// Runs the search for a specified number of iterations, ignoring the configured count
    /// and time limit.
    pub fn iterate_n_times(&mut self, n: u32) -> Result<(), MctsError> {
        for _ in 0..n {
            self.iterate()?;
        }
        Ok(())
    }

    /// Performs one full iteration: selection, expansion, simulation and backpropagation.
    /// Returns the node the rollout started from.
    ///
    /// If the game rejects a move, the error is returned and the tree is left exactly as it
    /// was before the call.
    pub fn iterate(&mut self) -> Result<NodeId, MctsError> {
        let mut node_id = self.root_id;
        let mut simulated_state = self.node(node_id)?.value().state.clone();

        // 1. Selection: descend through fully expanded nodes.
        loop {
            let node = self.node(node_id)?;
            if node.value().has_untried_moves() {
                break;
            }
            let Some(child) = first_max_child(node, |data| data.selection_score) else {
                break;
            };
            if let Some(child_move) = &child.value().prev_move {
                simulated_state.apply(child_move)?;
            }
            node_id = child.id();
        }

        // 2. Expansion: prepare exactly one child, unless the node is terminal.
        // Nothing is written to the tree until the rollout has succeeded too.
        let parent = self.tree.get(node_id).ok_or(MctsError::UnknownNode(node_id))?;
        let expansion = if parent.value().has_untried_moves() {
            let index = parent.value().pick_untried_index(&mut self.random)?;
            let untried_move = parent.value().untried_moves[index].clone();
            simulated_state.apply(&untried_move)?;

            let mut child = MctsNode::new(
                Some(untried_move),
                simulated_state.clone(),
                self.config.exploration_constant,
            );
            child.height = parent.value().height + 1;
            Some((index, child))
        } else {
            None
        };

        // 3. Simulation.
        let steps = self.rollout_policy.rollout(
            &mut simulated_state,
            self.config.simulations_per_iteration,
            &mut self.random,
        )?;

        if let Some((index, child)) = expansion {
            let mut parent = self
                .tree
                .get_mut(node_id)
                .ok_or(MctsError::UnknownNode(node_id))?;
            parent.value().untried_moves.remove(index);
            node_id = parent.append(child).id();
        }

        // 4. Backpropagation.
        self.backpropagate(node_id, |player| simulated_state.score(player))?;

        trace!(
            height = self.node(node_id)?.value().height,
            rollout_steps = steps,
            "iteration complete"
        );
        Ok(node_id)
    }

    /// Folds an outcome into `node_id` and all of its ancestors.
    ///
    /// Every node on the path records `score(node.player)`. Selection scores are refreshed
    /// afterwards, parents first, so each node sees its parent's already incremented visit
    /// count. Siblings off the path keep their cached scores.
    pub fn backpropagate<F>(&mut self, node_id: NodeId, score: F) -> Result<(), MctsError>
    where
        F: Fn(S::Player) -> f64,
    {
        let mut path = Vec::new();
        let mut current = Some(node_id);
        while let Some(id) = current {
            let mut node = self.tree.get_mut(id).ok_or(MctsError::UnknownNode(id))?;
            let data = node.value();
            let outcome = score(data.player);
            data.record_outcome(outcome);
            path.push(id);
            current = self.node(id)?.parent().map(|parent| parent.id());
        }

        for &id in path.iter().rev() {
            let parent_visits = self.node(id)?.parent().map(|parent| parent.value().visits);
            if let Some(parent_visits) = parent_visits {
                let mut node = self.tree.get_mut(id).ok_or(MctsError::UnknownNode(id))?;
                node.value().update_selection_score(parent_visits);
            }
        }
        Ok(())
    }

    /// Returns the child of `node_id` with the highest cached selection score, first inserted
    /// on ties, or `None` if the node has no children.
    pub fn select_child(&self, node_id: NodeId) -> Result<Option<NodeId>, MctsError> {
        let node = self.node(node_id)?;
        Ok(first_max_child(node, |data| data.selection_score).map(|child| child.id()))
    }

    /// Returns the root's most visited child, first inserted on ties.
    pub fn most_visited_child(&self) -> Option<NodeRef<'_, MctsNode<S>>> {
        first_max_child(self.tree.root(), |data| data.visits)
    }

    /// Returns the move leading to the most visited child of the root.
    pub fn best_move(&self) -> Result<S::Move, MctsError> {
        self.most_visited_child()
            .and_then(|child| child.value().prev_move.clone())
            .ok_or(MctsError::NoMovesAvailable)
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            total_nodes: self.tree.nodes().count(),
            root_visits: self.get_root().value().visits,
            max_depth: self
                .tree
                .values()
                .map(|data| data.height)
                .max()
                .unwrap_or(0),
        }
    }

    /// Renders the tree depth first, one node per line, indented by depth.
    pub fn dump_tree(&self) -> String {
        let mut out = String::new();
        for node in self.tree.root().descendants() {
            let data = node.value();
            let prev_move = match &data.prev_move {
                Some(prev_move) => format!("{prev_move:?}"),
                None => "-".to_string(),
            };
            out.push_str(&format!(
                "{}d{}>p{:?} move:{} oc{:.6} vst{}\n",
                "  ".repeat(data.height as usize),
                data.height,
                data.player,
                prev_move,
                data.total_outcome,
                data.visits
            ));
        }
        out
    }
}

/// The first child with the greatest key. Later children must be strictly greater to win.
fn first_max_child<'a, S, K, F>(
    node: NodeRef<'a, MctsNode<S>>,
    key: F,
) -> Option<NodeRef<'a, MctsNode<S>>>
where
    S: GameState,
    K: PartialOrd,
    F: Fn(&MctsNode<S>) -> K,
{
    let mut best: Option<(NodeRef<'a, MctsNode<S>>, K)> = None;
    for child in node.children() {
        let child_key = key(child.value());
        let replace = match &best {
            Some((_, best_key)) => child_key > *best_key,
            None => true,
        };
        if replace {
            best = Some((child, child_key));
        }
    }
    best.map(|(child, _)| child)
}

/// Statistics about a search tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u64,
    pub max_depth: u32,
}
