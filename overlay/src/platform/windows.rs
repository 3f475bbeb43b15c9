//! Windows platform implementation
//!
//! Win32 layered windows give the overlay per-pixel alpha, topmost stacking
//! and a non-activating style, so the game keeps input focus while the
//! overlay stays clickable. The target-window probe resolves the game
//! client by title on every call; a window handle from a foreign process is
//! never valid for longer than one cycle.

use std::mem;
use std::ptr;

use windows::core::PCWSTR;
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, POINT, RECT, SIZE, WPARAM};
use windows::Win32::Graphics::Gdi::{
    CreateCompatibleDC, CreateDIBSection, DeleteDC, EnumDisplayMonitors, GetCurrentObject, GetDC,
    GetMonitorInfoW, ReleaseDC, SelectObject, SetDIBits, BITMAPINFO, BITMAPINFOHEADER,
    BLENDFUNCTION, BI_RGB, DIB_RGB_COLORS, HBITMAP, HDC, HMONITOR, MONITORINFO, OBJ_BITMAP,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, SetCapture};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, FindWindowW,
    GetCursorPos, GetForegroundWindow, GetWindowRect, LoadCursorW, PeekMessageW, RegisterClassExW,
    SetWindowPos, ShowWindow, TranslateMessage, UpdateLayeredWindow, CS_HREDRAW, CS_VREDRAW,
    HTCLIENT, HWND_TOPMOST, IDC_ARROW, MSG, PM_REMOVE, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE,
    SW_HIDE, SW_SHOWNOACTIVATE, ULW_ALPHA, WM_DESTROY, WM_ERASEBKGND, WM_LBUTTONDOWN,
    WM_LBUTTONUP, WM_MOUSEMOVE, WM_NCHITTEST, WM_QUIT, WM_RBUTTONUP, WNDCLASSEXW, WS_EX_LAYERED,
    WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
};

use sumtrack_core::anchor::{TargetWindow, WindowProbe};
use sumtrack_types::Rect;

use super::{
    clamp_to_virtual_screen, ClickEvent, MonitorInfo, MouseButton, OverlayConfig, OverlayPlatform,
    PlatformError,
};

const CLASS_NAME: &str = "SumtrackOverlayClass";

/// Movement past this many pixels turns a left press into a drag.
const DRAG_THRESHOLD_PX: i32 = 3;

/// Windows overlay window.
pub struct Win32Overlay {
    hwnd: HWND,
    hdc_mem: HDC,
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    pixel_data: Vec<u8>,
    bgra_buffer: Vec<u8>, // Pre-allocated RGBA->BGRA conversion buffer
    visible: bool,
    running: bool,
    position_dirty: bool,
    pending_click: Option<ClickEvent>,

    // Left-press tracking; screen coordinates keep the drag stable
    pressed: bool,
    is_dragging: bool,
    press_client_x: i32,
    press_client_y: i32,
    drag_start_screen_x: i32,
    drag_start_screen_y: i32,
    drag_start_win_x: i32,
    drag_start_win_y: i32,
}

impl Win32Overlay {
    fn register_class() -> Result<(), PlatformError> {
        unsafe {
            let class_name = wide_string(CLASS_NAME);
            let hinstance = GetModuleHandleW(None)
                .map_err(|e| PlatformError::Other(format!("GetModuleHandleW failed: {e}")))?;

            let wc = WNDCLASSEXW {
                cbSize: mem::size_of::<WNDCLASSEXW>() as u32,
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(window_proc),
                hInstance: hinstance.into(),
                hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
                lpszClassName: PCWSTR(class_name.as_ptr()),
                ..Default::default()
            };

            let atom = RegisterClassExW(&wc);
            if atom == 0 {
                let err = std::io::Error::last_os_error();
                // ERROR_CLASS_ALREADY_EXISTS: re-registration across windows
                if err.raw_os_error() != Some(1410) {
                    return Err(PlatformError::WindowCreation(format!(
                        "RegisterClassExW failed: {err}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn create_dib_section(&mut self) -> Result<(), PlatformError> {
        unsafe {
            let hdc_screen = GetDC(HWND::default());

            if !self.hdc_mem.is_invalid() {
                let _ = DeleteDC(self.hdc_mem);
            }

            self.hdc_mem = CreateCompatibleDC(hdc_screen);
            if self.hdc_mem.is_invalid() {
                ReleaseDC(HWND::default(), hdc_screen);
                return Err(PlatformError::BufferError(
                    "CreateCompatibleDC failed".to_string(),
                ));
            }

            let bmi = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: self.width as i32,
                    biHeight: -(self.height as i32), // Top-down DIB
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    ..Default::default()
                },
                ..Default::default()
            };

            let mut bits: *mut std::ffi::c_void = ptr::null_mut();
            let hbitmap = CreateDIBSection(hdc_screen, &bmi, DIB_RGB_COLORS, &mut bits, None, 0)
                .map_err(|e| {
                    PlatformError::BufferError(format!("CreateDIBSection failed: {e}"))
                })?;

            SelectObject(self.hdc_mem, hbitmap);
            ReleaseDC(HWND::default(), hdc_screen);

            let size = (self.width * self.height * 4) as usize;
            self.pixel_data.resize(size, 0);
            self.bgra_buffer.resize(size, 0);
        }
        Ok(())
    }

    fn update_layered_window(&mut self) {
        unsafe {
            let hdc_screen = GetDC(HWND::default());

            let bmi = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: self.width as i32,
                    biHeight: -(self.height as i32),
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    ..Default::default()
                },
                ..Default::default()
            };

            // RGBA (premultiplied) -> BGRA, as UpdateLayeredWindow expects
            for (src, dst) in self
                .pixel_data
                .chunks_exact(4)
                .zip(self.bgra_buffer.chunks_exact_mut(4))
            {
                dst[0] = src[2];
                dst[1] = src[1];
                dst[2] = src[0];
                dst[3] = src[3];
            }

            let hgdiobj = GetCurrentObject(self.hdc_mem, OBJ_BITMAP);
            let hbitmap = HBITMAP(hgdiobj.0);
            SetDIBits(
                self.hdc_mem,
                hbitmap,
                0,
                self.height,
                self.bgra_buffer.as_ptr() as *const _,
                &bmi,
                DIB_RGB_COLORS,
            );

            let pt_src = POINT { x: 0, y: 0 };
            let pt_dst = POINT {
                x: self.x,
                y: self.y,
            };
            let size = SIZE {
                cx: self.width as i32,
                cy: self.height as i32,
            };
            let blend = BLENDFUNCTION {
                BlendOp: 0,             // AC_SRC_OVER
                BlendFlags: 0,
                SourceConstantAlpha: 255,
                AlphaFormat: 1,         // AC_SRC_ALPHA (premultiplied)
            };

            let _ = UpdateLayeredWindow(
                self.hwnd,
                hdc_screen,
                Some(&pt_dst),
                Some(&size),
                self.hdc_mem,
                Some(&pt_src),
                COLORREF(0),
                Some(&blend),
                ULW_ALPHA,
            );

            ReleaseDC(HWND::default(), hdc_screen);
        }
    }
}

impl OverlayPlatform for Win32Overlay {
    fn new(config: OverlayConfig) -> Result<Self, PlatformError> {
        Self::register_class()?;

        let hwnd = unsafe {
            let class_name = wide_string(CLASS_NAME);
            let window_name = wide_string(&config.namespace);
            let hinstance = GetModuleHandleW(None)
                .map_err(|e| PlatformError::Other(format!("GetModuleHandleW failed: {e}")))?;

            // Layered for per-pixel alpha, toolwindow to stay off the
            // taskbar, noactivate so the game keeps input focus.
            let ex_style = WS_EX_LAYERED | WS_EX_TOPMOST | WS_EX_TOOLWINDOW | WS_EX_NOACTIVATE;

            CreateWindowExW(
                ex_style,
                PCWSTR(class_name.as_ptr()),
                PCWSTR(window_name.as_ptr()),
                WS_POPUP,
                config.x,
                config.y,
                config.width as i32,
                config.height as i32,
                None,
                None,
                hinstance,
                None,
            )
            .map_err(|e| PlatformError::WindowCreation(format!("CreateWindowExW failed: {e}")))?
        };

        let mut overlay = Self {
            hwnd,
            hdc_mem: HDC::default(),
            width: config.width,
            height: config.height,
            x: config.x,
            y: config.y,
            pixel_data: vec![0u8; (config.width * config.height * 4) as usize],
            bgra_buffer: vec![0u8; (config.width * config.height * 4) as usize],
            visible: false,
            running: true,
            position_dirty: false,
            pending_click: None,
            pressed: false,
            is_dragging: false,
            press_client_x: 0,
            press_client_y: 0,
            drag_start_screen_x: 0,
            drag_start_screen_y: 0,
            drag_start_win_x: config.x,
            drag_start_win_y: config.y,
        };

        overlay.create_dib_section()?;
        // Created hidden; the anchor decides when the overlay appears.
        Ok(overlay)
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn x(&self) -> i32 {
        self.x
    }

    fn y(&self) -> i32 {
        self.y
    }

    fn set_position(&mut self, x: i32, y: i32) {
        let monitors = self.monitors();
        let (clamped_x, clamped_y) =
            clamp_to_virtual_screen(x, y, self.width, self.height, &monitors);

        if clamped_x == self.x && clamped_y == self.y {
            return;
        }
        self.x = clamped_x;
        self.y = clamped_y;
        unsafe {
            let _ = SetWindowPos(
                self.hwnd,
                HWND_TOPMOST,
                clamped_x,
                clamped_y,
                0,
                0,
                SWP_NOSIZE | SWP_NOACTIVATE,
            );
        }
    }

    fn set_size(&mut self, width: u32, height: u32) -> Result<(), PlatformError> {
        if width == self.width && height == self.height {
            return Ok(());
        }
        self.width = width;
        self.height = height;
        self.create_dib_section()?;

        unsafe {
            let _ = SetWindowPos(
                self.hwnd,
                HWND_TOPMOST,
                0,
                0,
                width as i32,
                height as i32,
                SWP_NOMOVE | SWP_NOACTIVATE,
            );
        }
        Ok(())
    }

    fn show(&mut self) {
        if !self.visible {
            unsafe {
                let _ = ShowWindow(self.hwnd, SW_SHOWNOACTIVATE);
            }
            self.visible = true;
        }
    }

    fn hide(&mut self) {
        if self.visible {
            unsafe {
                let _ = ShowWindow(self.hwnd, SW_HIDE);
            }
            self.visible = false;
            // A hidden window cannot be mid-drag
            self.pressed = false;
            self.is_dragging = false;
        }
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn pixel_buffer(&mut self) -> &mut [u8] {
        &mut self.pixel_data
    }

    fn commit(&mut self) {
        self.update_layered_window();
    }

    fn poll_events(&mut self) -> bool {
        unsafe {
            let mut msg = MSG::default();
            while PeekMessageW(&mut msg, self.hwnd, 0, 0, PM_REMOVE).as_bool() {
                if msg.message == WM_QUIT {
                    self.running = false;
                    return false;
                }

                match msg.message {
                    WM_LBUTTONDOWN => {
                        self.pressed = true;
                        self.is_dragging = false;
                        self.press_client_x = (msg.lParam.0 & 0xFFFF) as i16 as i32;
                        self.press_client_y = ((msg.lParam.0 >> 16) & 0xFFFF) as i16 as i32;

                        let mut pt = POINT::default();
                        let _ = GetCursorPos(&mut pt);
                        self.drag_start_screen_x = pt.x;
                        self.drag_start_screen_y = pt.y;
                        self.drag_start_win_x = self.x;
                        self.drag_start_win_y = self.y;
                        let _ = SetCapture(self.hwnd);
                    }
                    WM_MOUSEMOVE if self.pressed => {
                        let mut pt = POINT::default();
                        let _ = GetCursorPos(&mut pt);
                        let dx = pt.x - self.drag_start_screen_x;
                        let dy = pt.y - self.drag_start_screen_y;

                        if !self.is_dragging
                            && (dx.abs() > DRAG_THRESHOLD_PX || dy.abs() > DRAG_THRESHOLD_PX)
                        {
                            self.is_dragging = true;
                        }
                        if self.is_dragging {
                            self.set_position(self.drag_start_win_x + dx, self.drag_start_win_y + dy);
                            self.position_dirty = true;
                        }
                    }
                    WM_LBUTTONUP => {
                        let _ = ReleaseCapture();
                        if self.pressed && !self.is_dragging {
                            self.pending_click = Some(ClickEvent {
                                x: self.press_client_x,
                                y: self.press_client_y,
                                button: MouseButton::Left,
                            });
                        }
                        self.pressed = false;
                        self.is_dragging = false;
                    }
                    WM_RBUTTONUP => {
                        self.pending_click = Some(ClickEvent {
                            x: (msg.lParam.0 & 0xFFFF) as i16 as i32,
                            y: ((msg.lParam.0 >> 16) & 0xFFFF) as i16 as i32,
                            button: MouseButton::Right,
                        });
                    }
                    WM_DESTROY => {
                        self.running = false;
                        return false;
                    }
                    _ => {
                        let _ = TranslateMessage(&msg);
                        DispatchMessageW(&msg);
                    }
                }
            }
        }
        self.running
    }

    fn take_position_dirty(&mut self) -> bool {
        let dirty = self.position_dirty;
        self.position_dirty = false;
        dirty
    }

    fn take_pending_click(&mut self) -> Option<ClickEvent> {
        self.pending_click.take()
    }

    fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    fn monitors(&self) -> Vec<MonitorInfo> {
        enumerate_monitors()
    }
}

impl Drop for Win32Overlay {
    fn drop(&mut self) {
        unsafe {
            if !self.hdc_mem.is_invalid() {
                let _ = DeleteDC(self.hdc_mem);
            }
            if !self.hwnd.is_invalid() {
                let _ = DestroyWindow(self.hwnd);
            }
        }
    }
}

fn enumerate_monitors() -> Vec<MonitorInfo> {
    let mut monitors: Vec<MonitorInfo> = Vec::new();

    unsafe {
        unsafe extern "system" fn enum_callback(
            hmonitor: HMONITOR,
            _hdc: HDC,
            _rect: *mut RECT,
            lparam: LPARAM,
        ) -> windows::Win32::Foundation::BOOL {
            let monitors = &mut *(lparam.0 as *mut Vec<MonitorInfo>);

            let mut info = MONITORINFO {
                cbSize: mem::size_of::<MONITORINFO>() as u32,
                ..Default::default()
            };
            if GetMonitorInfoW(hmonitor, &mut info).as_bool() {
                let rc = info.rcMonitor;
                monitors.push(MonitorInfo {
                    x: rc.left,
                    y: rc.top,
                    width: (rc.right - rc.left) as u32,
                    height: (rc.bottom - rc.top) as u32,
                    is_primary: info.dwFlags & 1 != 0,
                });
            }

            windows::Win32::Foundation::BOOL::from(true)
        }

        let ptr = &mut monitors as *mut Vec<MonitorInfo>;
        let _ = EnumDisplayMonitors(None, None, Some(enum_callback), LPARAM(ptr as isize));
    }

    monitors
}

// ─────────────────────────────────────────────────────────────────────────────
// Target window probe
// ─────────────────────────────────────────────────────────────────────────────

/// Resolves the target application's window by exact title, every call.
pub struct Win32TargetProbe {
    title_wide: Vec<u16>,
}

impl Win32TargetProbe {
    pub fn new(title: &str) -> Self {
        Self {
            title_wide: wide_string(title),
        }
    }
}

impl WindowProbe for Win32TargetProbe {
    fn locate(&mut self) -> Option<TargetWindow> {
        unsafe {
            let hwnd = FindWindowW(PCWSTR::null(), PCWSTR(self.title_wide.as_ptr())).ok()?;
            if hwnd.is_invalid() {
                return None;
            }

            let mut rect = RECT::default();
            GetWindowRect(hwnd, &mut rect).ok()?;

            Some(TargetWindow {
                rect: Rect::new(
                    rect.left,
                    rect.top,
                    (rect.right - rect.left).max(0) as u32,
                    (rect.bottom - rect.top).max(0) as u32,
                ),
                is_foreground: GetForegroundWindow() == hwnd,
            })
        }
    }
}

/// Window procedure for overlay windows.
unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_NCHITTEST => LRESULT(HTCLIENT as isize),
        WM_ERASEBKGND => LRESULT(1), // Don't erase background
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// Convert a &str to a null-terminated wide string.
fn wide_string(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}
