// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Matthias Bilger <matthias@bilger.info>

use crate::hotplug::{decode_device_change, DeviceEvent, SubscriptionError};
use std::ffi::c_void;
use std::mem::size_of;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use windows::core::{GUID, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
    PostThreadMessageW, RegisterClassW, RegisterDeviceNotificationW, TranslateMessage,
    UnregisterDeviceNotification, CW_USEDEFAULT, DBT_DEVTYP_DEVICEINTERFACE,
    DEVICE_NOTIFY_WINDOW_HANDLE, DEV_BROADCAST_DEVICEINTERFACE_W, DEV_BROADCAST_HDR, HDEVNOTIFY,
    MSG, WM_DEVICECHANGE, WM_QUIT, WNDCLASSW,
};

/// Device-interface class for USB devices, the only class watched
const GUID_DEVINTERFACE_USB_DEVICE: GUID = GUID::from_u128(0xa5dcbf10_6530_11d2_901f_00c04fb951ed);

const WINDOW_CLASS: &str = "DevnotifyHotplugWnd";

// The window procedure is a plain function pointer, so the event sender
// lives in process state for the lifetime of the registration.
static EVENT_TX: Mutex<Option<Sender<DeviceEvent>>> = Mutex::new(None);

/// Hidden message window plus the thread pumping its message loop
pub(crate) struct WindowsBackend {
    thread_id: u32,
    pump: Option<JoinHandle<()>>,
}

impl WindowsBackend {
    /// Spawn the pump thread and wait for the OS registration to settle
    pub(crate) fn spawn() -> Result<(Self, Receiver<DeviceEvent>), SubscriptionError> {
        let (event_tx, event_rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::channel();

        let pump = thread::spawn(move || pump_messages(event_tx, ready_tx));

        match ready_rx.recv() {
            Ok(Ok(thread_id)) => Ok((
                Self {
                    thread_id,
                    pump: Some(pump),
                },
                event_rx,
            )),
            Ok(Err(e)) => {
                let _ = pump.join();
                Err(e)
            }
            Err(_) => {
                let _ = pump.join();
                Err(SubscriptionError::WindowCreation(
                    "notification thread exited during setup".to_string(),
                ))
            }
        }
    }

    /// Stop the message loop and release the registration
    pub(crate) fn shutdown(mut self) {
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        if let Some(pump) = self.pump.take() {
            let _ = pump.join();
        }
    }
}

struct Registration {
    hwnd: HWND,
    notification: HDEVNOTIFY,
}

impl Registration {
    fn release(self) {
        if let Ok(mut tx) = EVENT_TX.lock() {
            *tx = None;
        }
        unsafe {
            let _ = UnregisterDeviceNotification(self.notification);
            let _ = DestroyWindow(self.hwnd);
        }
    }
}

fn pump_messages(events: Sender<DeviceEvent>, ready: Sender<Result<u32, SubscriptionError>>) {
    let registration = match register(events) {
        Ok(registration) => registration,
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };

    let _ = ready.send(Ok(unsafe { GetCurrentThreadId() }));

    unsafe {
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, HWND(std::ptr::null_mut()), 0, 0).into() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    registration.release();
}

fn register(events: Sender<DeviceEvent>) -> Result<Registration, SubscriptionError> {
    let class_name: Vec<u16> = WINDOW_CLASS.encode_utf16().chain(std::iter::once(0)).collect();

    unsafe {
        let hinstance = GetModuleHandleW(None)
            .map_err(|e| SubscriptionError::WindowCreation(e.to_string()))?;

        let wnd_class = WNDCLASSW {
            lpfnWndProc: Some(wndproc),
            hInstance: hinstance.into(),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            ..Default::default()
        };
        // Fails with "class already exists" after a resubscribe; the
        // existing class is reused then
        RegisterClassW(&wnd_class);

        let hwnd = CreateWindowExW(
            Default::default(),
            PCWSTR(class_name.as_ptr()),
            PCWSTR(class_name.as_ptr()),
            Default::default(),
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            HWND(std::ptr::null_mut()),
            None,
            hinstance,
            None,
        )
        .map_err(|e| SubscriptionError::WindowCreation(e.to_string()))?;

        let mut filter = DEV_BROADCAST_DEVICEINTERFACE_W::default();
        filter.dbcc_size = size_of::<DEV_BROADCAST_DEVICEINTERFACE_W>() as u32;
        filter.dbcc_devicetype = DBT_DEVTYP_DEVICEINTERFACE.0;
        filter.dbcc_classguid = GUID_DEVINTERFACE_USB_DEVICE;

        let notification = RegisterDeviceNotificationW(
            hwnd,
            (&filter as *const DEV_BROADCAST_DEVICEINTERFACE_W) as *const c_void,
            DEVICE_NOTIFY_WINDOW_HANDLE,
        )
        .map_err(|e| {
            let _ = DestroyWindow(hwnd);
            SubscriptionError::RegistrationFailed(e.to_string())
        })?;

        if let Ok(mut tx) = EVENT_TX.lock() {
            *tx = Some(events);
        }

        Ok(Registration { hwnd, notification })
    }
}

unsafe extern "system" fn wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if msg == WM_DEVICECHANGE {
        if let Some((device_type, path)) = broadcast_payload(lparam) {
            if let Some(event) = decode_device_change(wparam.0 as u32, device_type, &path) {
                if let Ok(tx) = EVENT_TX.lock() {
                    if let Some(tx) = tx.as_ref() {
                        let _ = tx.send(event);
                    }
                }
            }
        }
        return LRESULT(0);
    }
    DefWindowProcW(hwnd, msg, wparam, lparam)
}

/// Read the broadcast header behind a WM_DEVICECHANGE lparam. Returns the
/// payload device type and, for device-interface payloads, the interface
/// path; other payload types carry no path.
unsafe fn broadcast_payload(lparam: LPARAM) -> Option<(u32, String)> {
    if lparam.0 == 0 {
        return None;
    }
    let hdr = lparam.0 as *const DEV_BROADCAST_HDR;
    let device_type = (*hdr).dbch_devicetype;
    if device_type != DBT_DEVTYP_DEVICEINTERFACE {
        return Some((device_type.0, String::new()));
    }

    let iface = hdr as *const DEV_BROADCAST_DEVICEINTERFACE_W;
    let name = (*iface).dbcc_name.as_ptr();
    if name.is_null() {
        return None;
    }
    let mut len = 0usize;
    while *name.add(len) != 0 {
        len += 1;
    }
    let path = String::from_utf16_lossy(std::slice::from_raw_parts(name, len));
    Some((device_type.0, path))
}
