use boxfly::{Axis, BoxId, Scene, SceneConfig, StaticDisplay, Texture};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let hand = Texture::solid("redhand", 64, 64, [0xcc, 0x00, 0x00, 0xff]);
    let mut scene = Scene::assemble(&SceneConfig::grid_2x2(), hand, &StaticDisplay::default())?;
    scene.start();

    // A 60 Hz host loop; the timeline runs at 60 fps so every tick is one frame.
    while !scene.is_idle() {
        scene.tick_msecs(1000.0 / 60.0);
        let tick = scene.stage().ticks();
        if tick % 30 == 1 {
            let b = scene.stage().box_ref(BoxId(0))?;
            println!(
                "tick {tick:3}: box 0 at ({:8.1}, {:8.1}) depth {:8.1} rot y {:6.1} z {:5.1}",
                b.position().x,
                b.position().y,
                b.depth(),
                b.rotation(Axis::Y),
                b.rotation(Axis::Z),
            );
        }
    }

    println!("landed after {} ticks", scene.stage().ticks());
    let report = scene.teardown();
    println!("released {report:?}");
    Ok(())
}
