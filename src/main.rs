use anyhow::Context;
use isoview::assets::{SheetImage, load_sheet};
use isoview::config::{CONFIG_PATH, Config};
use isoview::game::{GameState, InputEvent, InputSnapshot, MoveKeys};
use isoview::map::TileMap;
use isoview::math::Vec2;
use isoview::misc::Logger;
use isoview::render::{self, DrawInstruction, DrawSink};
use isoview::sprites::{CHARACTER_SHEET, Sheet, SheetLayout, TILE_SHEET};
use log::LevelFilter;
use sdl2::EventPump;
use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::mouse::MouseButton;
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Texture, TextureCreator, WindowCanvas};
use sdl2::video::WindowContext;
use std::time::Duration;

const BACKGROUND: Color = Color::RGB(0x3b, 0x3b, 0x3b);

fn main() -> anyhow::Result<()> {
    // Everything passes until the config says otherwise
    Logger::new(LevelFilter::Trace).install()?;
    let config = Config::load(CONFIG_PATH)?;
    log::set_max_level(config.level_filter()?);

    let map = TileMap::generate(config.map_width, config.map_height, config.seed)?;
    let tiles_image = load_sheet(&config.tiles_path, TILE_SHEET)?;
    let character_image = load_sheet(&config.character_path, CHARACTER_SHEET)?;

    let sdl_context = sdl2::init().map_err(anyhow::Error::msg)?;
    let video_subsystem = sdl_context.video().map_err(anyhow::Error::msg)?;
    let window = video_subsystem
        .window("Isometric Tiles", config.window_width, config.window_height)
        .position_centered()
        .build()
        .context("couldn't create window")?;
    let mut canvas = window.into_canvas().accelerated().build().context("couldn't create canvas")?;
    let texture_creator = canvas.texture_creator();
    let mut event_pump = sdl_context.event_pump().map_err(anyhow::Error::msg)?;

    let tiles = create_texture(&texture_creator, &tiles_image).context("tile sheet")?;
    let character = create_texture(&texture_creator, &character_image).context("character sheet")?;

    // The highlight tile stands in for the cursor
    let mouse = sdl_context.mouse();
    mouse.show_cursor(false);
    canvas.window_mut().set_grab(true);
    mouse.warp_mouse_in_window(
        canvas.window(),
        (config.window_width / 2) as i32,
        (config.window_height / 2) as i32,
    );

    let mut state = GameState::new(&config);
    log::info!("Starting with a {}x{} map", map.width(), map.height());

    while state.running {
        let input = gather_input(&mut event_pump);
        state.update(&input, &map);
        if !state.running {
            break;
        }

        let frame = render::render(&state, &map);
        canvas.set_draw_color(BACKGROUND);
        canvas.clear();
        render::submit(
            &frame,
            &mut CanvasSink { canvas: &mut canvas, tiles: &tiles, character: &character },
        )?;
        canvas.present();

        std::thread::sleep(Duration::from_millis(config.frame_delay_ms));
    }

    log::info!("Bye");
    Ok(())
}

fn create_texture<'a>(
    texture_creator: &'a TextureCreator<WindowContext>,
    image: &SheetImage,
) -> anyhow::Result<Texture<'a>> {
    let mut texture = texture_creator.create_texture_static(
        PixelFormatEnum::ABGR8888,
        image.width,
        image.height,
    )?;
    texture.update(None, &image.rgba, image.pitch())?;
    texture.set_blend_mode(BlendMode::Blend);
    Ok(texture)
}

fn gather_input(event_pump: &mut EventPump) -> InputSnapshot {
    let mut events = Vec::new();
    for event in event_pump.poll_iter() {
        match event {
            Event::Quit { .. } | Event::KeyUp { keycode: Some(Keycode::Escape), .. } => {
                events.push(InputEvent::Quit);
            }
            Event::KeyUp { keycode: Some(Keycode::Space), .. } => {
                events.push(InputEvent::ToggleMode);
            }
            Event::MouseButtonDown { mouse_btn: MouseButton::Left, .. } => {
                events.push(InputEvent::Click);
            }
            Event::MouseWheel { y, .. } if y != 0 => {
                events.push(InputEvent::Wheel(y));
            }
            _ => {}
        }
    }

    let keyboard = event_pump.keyboard_state();
    let keys = MoveKeys {
        up: keyboard.is_scancode_pressed(Scancode::W),
        down: keyboard.is_scancode_pressed(Scancode::S),
        left: keyboard.is_scancode_pressed(Scancode::A),
        right: keyboard.is_scancode_pressed(Scancode::D),
    };

    let mouse_state = event_pump.mouse_state();
    InputSnapshot { events, keys, mouse: Vec2::new(mouse_state.x(), mouse_state.y()) }
}

struct CanvasSink<'c, 't> {
    canvas: &'c mut WindowCanvas,
    tiles: &'c Texture<'t>,
    character: &'c Texture<'t>,
}

impl DrawSink for CanvasSink<'_, '_> {
    fn draw(&mut self, instruction: &DrawInstruction) -> anyhow::Result<()> {
        let texture = match instruction.sheet {
            Sheet::Tiles => self.tiles,
            Sheet::Character => self.character,
        };
        let Some(clip) = SheetLayout::for_sheet(instruction.sheet).clip(instruction.clip) else {
            log::warn!(once = true; "No cell {} in {:?} sheet", instruction.clip, instruction.sheet);
            return Ok(());
        };

        let (width, height) = render::scaled_size(instruction);
        let src = Rect::new(clip.x as i32, clip.y as i32, clip.width, clip.height);
        let dst = Rect::new(instruction.position.x, instruction.position.y, width, height);
        self.canvas.copy(texture, src, dst).map_err(anyhow::Error::msg)
    }
}
