use still_life::{SceneConfig, flow};

fn main() -> anyhow::Result<()> {
    flow::run(SceneConfig::from_env())
}
